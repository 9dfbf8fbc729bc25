use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Interested,
    Going,
    Went,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interested => "interested",
            Self::Going => "going",
            Self::Went => "went",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "interested" => Some(Self::Interested),
            "going" => Some(Self::Going),
            "went" => Some(Self::Went),
            _ => None,
        }
    }
}

impl From<AttendanceStatus> for String {
    fn from(status: AttendanceStatus) -> String {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Ticket,
    Travel,
    Accommodation,
    FoodDrink,
    Merch,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ticket => "ticket",
            Self::Travel => "travel",
            Self::Accommodation => "accommodation",
            Self::FoodDrink => "food_drink",
            Self::Merch => "merch",
            Self::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ticket" => Some(Self::Ticket),
            "travel" => Some(Self::Travel),
            "accommodation" => Some(Self::Accommodation),
            "food_drink" => Some(Self::FoodDrink),
            "merch" => Some(Self::Merch),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl From<ExpenseCategory> for String {
    fn from(category: ExpenseCategory) -> String {
        category.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    #[default]
    Manual,
    Ticketmaster,
    Setlistfm,
    Lastfm,
    Bandsintown,
}

impl EventSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Ticketmaster => "ticketmaster",
            Self::Setlistfm => "setlistfm",
            Self::Lastfm => "lastfm",
            Self::Bandsintown => "bandsintown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(Self::Manual),
            "ticketmaster" => Some(Self::Ticketmaster),
            "setlistfm" => Some(Self::Setlistfm),
            "lastfm" => Some(Self::Lastfm),
            "bandsintown" => Some(Self::Bandsintown),
            _ => None,
        }
    }
}

impl From<EventSource> for String {
    fn from(source: EventSource) -> String {
        source.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_status_round_trips() {
        for status in [
            AttendanceStatus::Interested,
            AttendanceStatus::Going,
            AttendanceStatus::Went,
        ] {
            assert_eq!(AttendanceStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(AttendanceStatus::from_str("maybe"), None);
    }

    #[test]
    fn status_labels_outlive_the_value() {
        // The label must not borrow from the enum value it came from.
        let label: &'static str = AttendanceStatus::Went.as_str();
        assert_eq!(label, "went");
        let source: &'static str = EventSource::Ticketmaster.as_str();
        assert_eq!(source, "ticketmaster");
    }

    #[test]
    fn expense_category_round_trips() {
        assert_eq!(
            ExpenseCategory::from_str("food_drink"),
            Some(ExpenseCategory::FoodDrink)
        );
        assert_eq!(ExpenseCategory::from_str("groceries"), None);
    }
}
