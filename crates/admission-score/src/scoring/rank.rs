use serde::{Deserialize, Serialize};

use super::error::{InvalidRecordReason, ScoreError};

/// Highest rank a subject can receive in one term.
pub const MAX_RANK: u8 = 5;

/// The fixed subject set recorded for every semester, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Korean,
    Social,
    History,
    Math,
    Science,
    TechHome,
    English,
}

impl Subject {
    pub const COUNT: usize = 7;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Korean,
            Self::Social,
            Self::History,
            Self::Math,
            Self::Science,
            Self::TechHome,
            Self::English,
        ]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Korean => 0,
            Self::Social => 1,
            Self::History => 2,
            Self::Math => 3,
            Self::Science => 4,
            Self::TechHome => 5,
            Self::English => 6,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Korean => "Korean",
            Self::Social => "Social",
            Self::History => "History",
            Self::Math => "Math",
            Self::Science => "Science",
            Self::TechHome => "Tech & Home",
            Self::English => "English",
        }
    }
}

/// Converted grade for one subject in one term, `0..=MAX_RANK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SubjectRank(u8);

impl SubjectRank {
    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if value > MAX_RANK {
            return Err(ScoreError::InvalidRecord(
                InvalidRecordReason::RankOutOfRange { value },
            ));
        }
        Ok(Self(value))
    }

    /// Letter form used on admission forms. `X` marks a subject not taken.
    pub fn from_letter(letter: char) -> Result<Option<Self>, ScoreError> {
        let value = match letter.to_ascii_uppercase() {
            'A' => 5,
            'B' => 4,
            'C' => 3,
            'D' => 2,
            'E' => 1,
            'X' => return Ok(None),
            other => {
                return Err(ScoreError::InvalidRecord(
                    InvalidRecordReason::UnknownGradeLetter { letter: other },
                ))
            }
        };
        Ok(Some(Self(value)))
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for SubjectRank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        SubjectRank::new(value).map_err(serde::de::Error::custom)
    }
}

/// Ranks for all seven subjects of one term; `None` means not taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRanks {
    #[serde(default)]
    pub korean: Option<SubjectRank>,
    #[serde(default)]
    pub social: Option<SubjectRank>,
    #[serde(default)]
    pub history: Option<SubjectRank>,
    #[serde(default)]
    pub math: Option<SubjectRank>,
    #[serde(default)]
    pub science: Option<SubjectRank>,
    #[serde(default)]
    pub tech_home: Option<SubjectRank>,
    #[serde(default)]
    pub english: Option<SubjectRank>,
}

impl SubjectRanks {
    /// Every subject at the same rank.
    pub fn uniform(rank: SubjectRank) -> Self {
        Self::from_array([Some(rank); Subject::COUNT])
    }

    pub fn from_array(ranks: [Option<SubjectRank>; Subject::COUNT]) -> Self {
        let [korean, social, history, math, science, tech_home, english] = ranks;
        Self {
            korean,
            social,
            history,
            math,
            science,
            tech_home,
            english,
        }
    }

    /// Parses a seven-letter semester string such as `"AABXCDE"`.
    pub fn from_letters(letters: &str) -> Result<Self, ScoreError> {
        let letters: Vec<char> = letters.trim().chars().collect();
        if letters.len() != Subject::COUNT {
            return Err(ScoreError::InvalidRecord(
                InvalidRecordReason::GradeLetterCount {
                    found: letters.len(),
                },
            ));
        }

        let mut ranks = [None; Subject::COUNT];
        for (slot, letter) in ranks.iter_mut().zip(letters) {
            *slot = SubjectRank::from_letter(letter)?;
        }
        Ok(Self::from_array(ranks))
    }

    pub fn to_array(&self) -> [Option<SubjectRank>; Subject::COUNT] {
        [
            self.korean,
            self.social,
            self.history,
            self.math,
            self.science,
            self.tech_home,
            self.english,
        ]
    }

    pub fn get(&self, subject: Subject) -> Option<SubjectRank> {
        self.to_array()[subject.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.to_array().iter().all(Option::is_none)
    }
}
