use chrono::{DateTime, Utc};

/// EventKind: the type of an advisory event
///
/// Types the advisory schema may grow later are kept as `Unrecognized`
/// instead of failing the whole index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Detection,
    TruePositiveDetermination,
    FalsePositiveDetermination,
    Fixed,
    AnalysisNotPlanned,
    FixNotPlanned,
    Unrecognized(String),
}

impl EventKind {
    /// Maps the `type` field of an advisory event
    pub fn from_type(event_type: &str) -> Self {
        match event_type {
            "detection" => EventKind::Detection,
            "true-positive-determination" => EventKind::TruePositiveDetermination,
            "false-positive-determination" => EventKind::FalsePositiveDetermination,
            "fixed" => EventKind::Fixed,
            "analysis-not-planned" => EventKind::AnalysisNotPlanned,
            "fix-not-planned" => EventKind::FixNotPlanned,
            other => EventKind::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Detection => "detection",
            EventKind::TruePositiveDetermination => "true-positive-determination",
            EventKind::FalsePositiveDetermination => "false-positive-determination",
            EventKind::Fixed => "fixed",
            EventKind::AnalysisNotPlanned => "analysis-not-planned",
            EventKind::FixNotPlanned => "fix-not-planned",
            EventKind::Unrecognized(event_type) => event_type,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event: one timestamped state transition of an advisory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    timestamp: DateTime<Utc>,
    kind: EventKind,
}

impl Event {
    pub fn new(timestamp: DateTime<Utc>, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }
}

/// Advisory: the lifecycle of one vulnerability for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    id: String,
    aliases: Vec<String>,
    events: Vec<Event>,
}

impl Advisory {
    pub fn new(id: String, aliases: Vec<String>, events: Vec<Event>) -> Self {
        Self {
            id,
            aliases,
            events,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Events in the order they appear in the advisory file
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events in chronological order
    ///
    /// The sort is stable: events sharing a timestamp keep file order.
    pub fn sorted_events(&self) -> Vec<&Event> {
        let mut sorted: Vec<&Event> = self.events.iter().collect();
        sorted.sort_by_key(|event| event.timestamp);
        sorted
    }
}

/// AdvisoryDocument: every advisory recorded for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryDocument {
    package_name: String,
    advisories: Vec<Advisory>,
}

impl AdvisoryDocument {
    pub fn new(package_name: String, advisories: Vec<Advisory>) -> Self {
        Self {
            package_name,
            advisories,
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }
}
