use serde::Deserialize;

/// Viewer mood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
}

impl Mood {
    /// Recognizes a questionnaire label; "Neutral" and unknown labels map to `None`
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Happy" => Some(Mood::Happy),
            "Sad" => Some(Mood::Sad),
            _ => None,
        }
    }

    /// Genre substrings any one of which satisfies this mood
    pub fn genres(self) -> &'static [&'static str] {
        match self {
            Mood::Happy => &["Comedy", "Adventure", "Family"],
            Mood::Sad => &["Drama", "Romance"],
        }
    }
}

/// Who the movie is being watched with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occasion {
    MovieDate,
    MovieNightWithFriends,
    FamilyViewing,
}

impl Occasion {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Movie Date" => Some(Occasion::MovieDate),
            "Movie Night with friends" => Some(Occasion::MovieNightWithFriends),
            "Watching a movie with family or relatives" => Some(Occasion::FamilyViewing),
            _ => None,
        }
    }

    pub fn genres(self) -> &'static [&'static str] {
        match self {
            Occasion::MovieDate => &["Romance"],
            Occasion::MovieNightWithFriends => &["Comedy", "Action", "Thriller"],
            Occasion::FamilyViewing => &["Family"],
        }
    }
}

/// How recent the movie must be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    LastThreeYears,
    LastFiveYears,
    LastTenYears,
    LastTwentyYears,
}

impl Age {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Published in the last 3 years" => Some(Age::LastThreeYears),
            "Published in the last 5 years" => Some(Age::LastFiveYears),
            "Published in the last 10 years" => Some(Age::LastTenYears),
            "Published in the last 20 years" => Some(Age::LastTwentyYears),
            _ => None,
        }
    }

    /// Earliest release year that still qualifies
    pub fn min_year(self) -> i32 {
        match self {
            Age::LastThreeYears => 2021,
            Age::LastFiveYears => 2019,
            Age::LastTenYears => 2014,
            Age::LastTwentyYears => 2004,
        }
    }
}

/// Category field as sent by clients: a single name or a list of names
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CategorySelection {
    One(String),
    Many(Vec<String>),
}

impl CategorySelection {
    /// Non-empty category names in the order given
    pub fn into_names(self) -> Vec<String> {
        let names = match self {
            CategorySelection::One(name) => vec![name],
            CategorySelection::Many(names) => names,
        };
        names.into_iter().filter(|n| !n.is_empty()).collect()
    }
}

/// Parsed, request-scoped filter settings
///
/// Every field is independent; `None` / empty means the corresponding
/// filter does not narrow the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub mood: Option<Mood>,
    pub genres: Vec<String>,
    pub occasion: Option<Occasion>,
    pub age: Option<Age>,
    pub categories: Vec<String>,
}

impl FilterCriteria {
    /// Builds criteria from raw questionnaire labels, dropping unrecognized ones
    pub fn from_labels(
        mood: Option<&str>,
        genres: Vec<String>,
        occasion: Option<&str>,
        age: Option<&str>,
        category: Option<CategorySelection>,
    ) -> Self {
        Self {
            mood: mood.and_then(Mood::from_label),
            genres,
            occasion: occasion.and_then(Occasion::from_label),
            age: age.and_then(Age::from_label),
            categories: category.map(CategorySelection::into_names).unwrap_or_default(),
        }
    }

    /// True when no filter would narrow the catalog
    pub fn is_unfiltered(&self) -> bool {
        self.mood.is_none()
            && self.genres.is_empty()
            && self.occasion.is_none()
            && self.age.is_none()
            && self.categories.is_empty()
    }
}
