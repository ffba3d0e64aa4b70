//! Localized narration.
//!
//! Every line the tutor says comes from a [`Phrasebook`]. Praise,
//! encouragement and the "next sum" line are picked at random from small
//! tables so repeated exercises do not sound identical.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{ExplanationTrace, Level, Statement};
use crate::error::TutorError;

/// Language of the narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en", alias = "en-US")]
    English,
    #[serde(rename = "nl", alias = "nl-NL")]
    Dutch,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Dutch => "nl",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "en-us" | "english" => Ok(Language::English),
            "nl" | "nl-nl" | "dutch" => Ok(Language::Dutch),
            other => Err(TutorError::config(format!(
                "unknown language '{}' (expected en or nl)",
                other
            ))),
        }
    }
}

const PRAISE_EN: [&str; 5] = [
    "Well done! That answer is right.",
    "Very good! That is indeed the right answer.",
    "Yes, that is right, you are doing well.",
    "Completely right!",
    "Indeed, that answer is correct.",
];

const PRAISE_NL: [&str; 5] = [
    "Goed zo! Dat antwoord klopt.",
    "Heel goed! Dat is inderdaad het juiste antwoord.",
    "Yes, dat klopt, je bent goed bezig.",
    "Helemaal goed!",
    "Inderdaad, dat antwoord klopt.",
];

const ENCOURAGEMENT_EN: [&str; 5] = [
    "I think you made a mistake. That can happen!",
    "Unfortunately your answer is not right. I found this hard too!",
    "Your answer is not quite right.",
    "Too bad, your answer is not right. That can happen!",
    "I think your answer is not right, but you learn from mistakes!",
];

const ENCOURAGEMENT_NL: [&str; 5] = [
    "Ik denk dat je een fout hebt gemaakt. Kan gebeuren!",
    "Jouw antwoord is helaas niet goed. Ik vond dit ook lastig!",
    "Jouw antwoord klopt helaas niet helemaal.",
    "Jammer, je antwoord is niet goed. Dat kan gebeuren!",
    "Ik denk dat je antwoord niet klopt, maar van fouten kan je leren!",
];

const NEXT_SUM_EN: [&str; 3] = [
    "On to the next sum!",
    "Let's make another sum!",
    "Let's do another sum!",
];

const NEXT_SUM_NL: [&str; 3] = [
    "Op naar de volgende som!",
    "Laten we nog een som maken!",
    "Laten we nog een som doen!",
];

/// Renders narration in one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Phrasebook {
    language: Language,
}

impl Phrasebook {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn pick<R: Rng + ?Sized>(rng: &mut R, table: &[&'static str]) -> &'static str {
        table.choose(rng).copied().unwrap_or_default()
    }

    /// A random praise line for a solved exercise.
    pub fn praise<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        match self.language {
            Language::English => Self::pick(rng, &PRAISE_EN),
            Language::Dutch => Self::pick(rng, &PRAISE_NL),
        }
    }

    /// A random encouragement after a mistake.
    pub fn encouragement<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        match self.language {
            Language::English => Self::pick(rng, &ENCOURAGEMENT_EN),
            Language::Dutch => Self::pick(rng, &ENCOURAGEMENT_NL),
        }
    }

    /// A random line announcing another exercise.
    pub fn next_sum<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        match self.language {
            Language::English => Self::pick(rng, &NEXT_SUM_EN),
            Language::Dutch => Self::pick(rng, &NEXT_SUM_NL),
        }
    }

    /// Opening lines of a lesson for the given level.
    pub fn introduction(&self, level: Level, minutes: u64) -> Vec<String> {
        let minutes = minutes.max(1);
        match self.language {
            Language::English => vec![
                format!(
                    "Hi! Nice that you are here. Today we are going to practise subtraction together. \
                     First I will briefly explain how we do it. Then we will do sums for {}. \
                     If you make a mistake, that is fine: we just try again, or I explain how I would do it. \
                     I think you can do it!",
                    english_minutes(minutes)
                ),
                "We are going to practise subtraction below one hundred. \
                 First we take away the tens, then the units."
                    .to_string(),
                match level {
                    Level::One => "Shall we do the sums together? I will always say which number we take away, \
                                   and you tell me which number we end up at.",
                    Level::Two => "Shall we take jumps of 10 at a time? Then we do the units afterwards.",
                    Level::Three => "Shall we take big jumps of all the tens at once, \
                                     and take away the units after that?",
                    Level::Four => "Shall we take big jumps of all the tens at once? \
                                    Then we take away all the units in one go.",
                }
                .to_string(),
                "Always write down the sum I say straight away. \
                 Give your answer clearly when I ask for it. Tell me when you are ready to start!"
                    .to_string(),
            ],
            Language::Dutch => vec![
                format!(
                    "Leuk dat je er bent! Wij gaan vandaag samen rekenen. We gaan minsommen oefenen. \
                     Ik ga je eerst kort uitleggen hoe we dit ook alweer doen. Daarna gaan we {} sommen maken. \
                     Als je een fout maakt is dat niet erg, dan proberen we het gewoon opnieuw. \
                     Of leg ik je uit hoe ik het zou doen. Volgens mij kan je dat!",
                    dutch_minutes(minutes)
                ),
                "We gaan straks minsommen oefenen onder de honderd. \
                 We doen eerst de tientallen eraf, en dan de eenheden eraf."
                    .to_string(),
                match level {
                    Level::One => "Zullen we samen de sommen maken? Dan zeg ik steeds welk getal we eraf halen, \
                                   en dan mag jij zeggen op welk getal we uitkomen.",
                    Level::Two => "Zullen we sprongen van 10 tegelijk nemen? Dan doen we daarna de eenheden.",
                    Level::Three => "Zullen we grote sprongen van alle tientallen tegelijk nemen, \
                                     en daarna de eenheden eraf doen?",
                    Level::Four => "Zullen we grote sprongen van alle tientallen tegelijk nemen? \
                                    Dan halen we daarna alle eenheden er in 1 keer af.",
                }
                .to_string(),
                "Zorg ervoor dat je de som die ik zeg altijd meteen opschrijft. \
                 Geef duidelijk je antwoord als ik erom vraag. Laat maar weten als je klaar bent om te beginnen!"
                    .to_string(),
            ],
        }
    }

    /// Said once the learner is ready to start.
    pub fn first_exercise(&self) -> &'static str {
        match self.language {
            Language::English => {
                "Okay, here comes the first exercise. Don't forget to write down the sum!"
            }
            Language::Dutch => {
                "Oke, dan ga ik nu de eerste oefening aan je vertellen, vergeet niet om de som op te schrijven!"
            }
        }
    }

    pub fn conclusion(&self) -> &'static str {
        match self.language {
            Language::English => {
                "Our maths lesson is over! I think you did your very best. \
                 I think you will get much better at maths, just keep practising! \
                 I am going to take a break now, see you another time!"
            }
            Language::Dutch => {
                "Onze rekenles zit erop! Ik vind dat je heel goed je best hebt gedaan. \
                 Ik denk dat jij nog veel beter gaat worden in rekenen, vooral blijven oefenen! \
                 Ik ga nu even pauzeren, misschien tot een andere keer!"
            }
        }
    }

    /// Names the exercise about to be played.
    pub fn announce(&self, first: u32, second: u32) -> String {
        match self.language {
            Language::English => format!("The sum we are going to do now is {} minus {}.", first, second),
            Language::Dutch => format!("De som die we nu gaan doen is {} min {}.", first, second),
        }
    }

    /// Opening of the guided protocol.
    pub fn guided_opening(&self, first: u32, second: u32) -> String {
        match self.language {
            Language::English => format!(
                "To do {} minus {}, we first take away the tens. \
                 We do that best in jumps of 10 at a time!",
                first, second
            ),
            Language::Dutch => format!(
                "Als we {} min {} moeten doen, gaan we eerst de tientallen eraf halen. \
                 Dit kunnen we best in sprongen van 10 tegelijk doen!",
                first, second
            ),
        }
    }

    /// Guided prompt for the running total after the tutor's step.
    pub fn what_is(&self, from: u32, amount: u32) -> String {
        match self.language {
            Language::English => format!("What is {} minus {}?", from, amount),
            Language::Dutch => format!("Wat is {} min {}?", from, amount),
        }
    }

    pub fn ask_step(&self) -> &'static str {
        match self.language {
            Language::English => "Which number do you take away?",
            Language::Dutch => "Welk getal haal je er af?",
        }
    }

    pub fn ask_total(&self) -> &'static str {
        match self.language {
            Language::English => "Which number do you end up at?",
            Language::Dutch => "Op welk getal kom je uit?",
        }
    }

    /// Echo of a rejected number.
    pub fn heard(&self, number: u32) -> String {
        match self.language {
            Language::English => format!("I think you said {}.", number),
            Language::Dutch => format!("Volgens mij zei je {}.", number),
        }
    }

    pub fn not_heard(&self) -> &'static str {
        match self.language {
            Language::English => "Sorry, I did not hear you.",
            Language::Dutch => "Sorry, ik heb je niet goed verstaan.",
        }
    }

    /// Offer of the retry/explain choice after a first mistake.
    pub fn choice_offer(&self) -> &'static str {
        match self.language {
            Language::English => {
                "Do you want to try this sum again, or shall I explain how I solved it? \
                 Choose retry to try again, or explain to hear how I would do it."
            }
            Language::Dutch => {
                "Wil je deze som nog een keer proberen, of zal ik uitleggen hoe ik hem heb opgelost? \
                 Kies opnieuw om het nog een keer te proberen, of uitleg om te horen hoe ik het zou doen."
            }
        }
    }

    /// Where the exercise stood before the failed attempt.
    pub fn restate(&self, first: u32, second: u32, remaining: u32, position: u32) -> String {
        match self.language {
            Language::English => format!(
                "The sum was {} minus {}. There is still {} to subtract. We were at {}.",
                first, second, remaining, position
            ),
            Language::Dutch => format!(
                "De som was {} min {}. Er moet nog {} af. We zijn gebleven bij {}.",
                first, second, remaining, position
            ),
        }
    }

    /// Render a worked solution as one spoken text.
    pub fn explanation(&self, trace: &ExplanationTrace) -> String {
        trace
            .statements
            .iter()
            .map(|statement| self.statement(statement))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render one explanation statement.
    pub fn statement(&self, statement: &Statement) -> String {
        match self.language {
            Language::English => english_statement(statement),
            Language::Dutch => dutch_statement(statement),
        }
    }
}

fn english_statement(statement: &Statement) -> String {
    match *statement {
        Statement::Intro { first, second } => format!(
            "This is how I solved {} minus {}. From {} I have to take away {}.",
            first, second, first, second
        ),
        Statement::FirstTen => "I start by taking away 10.".to_string(),
        Statement::AnotherTen => "Then I take away 10 once more.".to_string(),
        Statement::AllTens { tens } => format!("I start with the tens. That is {}.", tens),
        Statement::TensDone { units } => format!(
            "Now all the tens are gone. Next the units. {}.",
            english_units(units)
        ),
        Statement::AllUnits { units } => {
            format!("Then I take away the units. {}.", english_units(units))
        }
        Statement::JumpToTen { from, amount } => format!(
            "First I jump from {} to the ten. So I take away {} first.",
            from, amount
        ),
        Statement::RestOfUnits {
            units,
            taken,
            remaining,
        } => format!(
            "Of the {} I have now taken away {}. So {} still have to go.",
            units, taken, remaining
        ),
        Statement::Subtract {
            from,
            amount,
            result,
        } => format!("{} minus {} is {}.", from, amount, result),
        Statement::Answer { result } => format!("So the answer is {}.", result),
    }
}

fn english_minutes(minutes: u64) -> String {
    if minutes == 1 {
        "1 minute".to_string()
    } else {
        format!("{} minutes", minutes)
    }
}

fn dutch_minutes(minutes: u64) -> String {
    if minutes == 1 {
        "1 minuut".to_string()
    } else {
        format!("{} minuten", minutes)
    }
}

fn english_units(units: u32) -> String {
    if units == 1 {
        "There is 1".to_string()
    } else {
        format!("There are {}", units)
    }
}

fn dutch_statement(statement: &Statement) -> String {
    match *statement {
        Statement::Intro { first, second } => format!(
            "Dit is hoe ik de som {} min {} op heb gelost. Ik moet van het getal {} er {} afhalen.",
            first, second, first, second
        ),
        Statement::FirstTen => "Ik begin met 10 eraf.".to_string(),
        Statement::AnotherTen => "Dan haal ik er nog een keer 10 van af.".to_string(),
        Statement::AllTens { tens } => {
            format!("Ik begin met de tientallen. Dat is {}.", tens)
        }
        Statement::TensDone { units } => format!(
            "Dan heb ik alle tientallen eraf gehaald. Nu de eenheden. {}.",
            dutch_units(units)
        ),
        Statement::AllUnits { units } => {
            format!("Daarna haal ik de eenheden eraf. {}.", dutch_units(units))
        }
        Statement::JumpToTen { from, amount } => format!(
            "Ik spring eerst van {} naar het tiental. Dus haal ik er eerst {} af.",
            from, amount
        ),
        Statement::RestOfUnits {
            units,
            taken,
            remaining,
        } => format!(
            "Van de {} heb ik er nu {} afgehaald. Nu moeten er dus nog {} af.",
            units, taken, remaining
        ),
        Statement::Subtract {
            from,
            amount,
            result,
        } => format!("{} min {} is {}.", from, amount, result),
        Statement::Answer { result } => format!("Het antwoord is dus {}.", result),
    }
}

fn dutch_units(units: u32) -> String {
    if units == 1 {
        "Dat is er 1".to_string()
    } else {
        format!("Dat zijn er {}", units)
    }
}
