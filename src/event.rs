use serde_json::Value;

/// Pitch length/width of the StatsBomb coordinate system.
pub const PITCH_LENGTH: f64 = 120.0;
pub const PITCH_WIDTH: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A pitch location as delivered by the feed: either a valid `[x, y]` pair or nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Location {
    At(Point),
    #[default]
    Unknown,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Location::At(Point { x, y })
    }

    pub fn from_value(value: Option<&Value>) -> Self {
        match value.map(extract_xy) {
            Some((Some(x), Some(y))) => Location::new(x, y),
            _ => Location::Unknown,
        }
    }

    pub fn point(&self) -> Option<Point> {
        match self {
            Location::At(p) => Some(*p),
            Location::Unknown => None,
        }
    }

    pub fn x(&self) -> Option<f64> {
        self.point().map(|p| p.x)
    }

    pub fn y(&self) -> Option<f64> {
        self.point().map(|p| p.y)
    }

    pub fn xy(&self) -> (Option<f64>, Option<f64>) {
        (self.x(), self.y())
    }
}

/// Split a raw location value into `(x, y)`.
///
/// Only a two-element array of numbers yields coordinates; every other shape
/// (null, wrong arity, strings, objects) gives `(None, None)`.
pub fn extract_xy(value: &Value) -> (Option<f64>, Option<f64>) {
    let Some([x, y]) = value.as_array().map(Vec::as_slice) else {
        return (None, None);
    };
    match (x.as_f64(), y.as_f64()) {
        (Some(x), Some(y)) => (Some(x), Some(y)),
        _ => (None, None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    Pass,
    Shot,
    Carry,
    Dribble,
    Other(String),
}

impl EventType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Pass" => EventType::Pass,
            "Shot" => EventType::Shot,
            "Carry" => EventType::Carry,
            "Dribble" => EventType::Dribble,
            other => EventType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventType::Pass => "Pass",
            EventType::Shot => "Shot",
            EventType::Carry => "Carry",
            EventType::Dribble => "Dribble",
            EventType::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub index: u32,
    pub period: u8,
    pub minute: u16,
    pub second: u8,
    pub team: Option<String>,
    pub player: Option<String>,
    pub kind: EventType,
    pub location: Location,
    // Taken from the type-specific sub-record (pass/carry/shot).
    pub end_location: Location,
    pub outcome: Option<String>,
}

impl Event {
    /// Minimal event, mostly for building inputs by hand.
    pub fn new(player: Option<&str>, kind: EventType) -> Self {
        Self {
            id: String::new(),
            index: 0,
            period: 1,
            minute: 0,
            second: 0,
            team: None,
            player: player.map(|p| p.to_string()),
            kind,
            location: Location::Unknown,
            end_location: Location::Unknown,
            outcome: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.location = Location::new(x, y);
        self
    }

    pub fn to(mut self, x: f64, y: f64) -> Self {
        self.end_location = Location::new(x, y);
        self
    }

    pub fn with_outcome(mut self, outcome: &str) -> Self {
        self.outcome = Some(outcome.to_string());
        self
    }

    pub fn clock_label(&self) -> String {
        format!("{}'{:02}", self.minute, self.second)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchInfo {
    pub match_id: u64,
    pub match_date: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u8>,
    pub away_score: Option<u8>,
    pub stage: Option<String>,
}

impl MatchInfo {
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    pub fn score_label(&self) -> String {
        match (self.home_score, self.away_score) {
            (Some(h), Some(a)) => format!("{h}-{a}"),
            _ => "-".to_string(),
        }
    }
}

/// Matches involving `team`, in source order.
pub fn team_matches(matches: &[MatchInfo], team: &str) -> Vec<MatchInfo> {
    matches.iter().filter(|m| m.involves(team)).cloned().collect()
}
