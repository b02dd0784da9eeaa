//! Roster -> interface description. Nothing here remembers a previous render.

use std::fmt;

use shared::domain::{Activity, ParticipantRef, Roster};

pub const NO_PARTICIPANTS_NOTICE: &str = "No participants yet. Be the first!";
pub const LOAD_FAILURE_NOTICE: &str = "Failed to load activities. Please try again later.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterView {
    pub cards: Vec<ActivityCard>,
    pub options: Vec<ActivityOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub spots_left: i64,
    pub participants: ParticipantList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantList {
    Empty,
    Rows(Vec<ParticipantRow>),
}

/// One enrolled email plus the removal control next to it. The control
/// carries both tags, so activating it needs nothing else from the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub email: String,
    pub remove: ParticipantRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityOption {
    pub value: String,
    pub label: String,
}

impl ActivityCard {
    fn from_activity(name: &str, activity: &Activity) -> Self {
        let participants = if activity.participants.is_empty() {
            ParticipantList::Empty
        } else {
            ParticipantList::Rows(
                activity
                    .participants
                    .iter()
                    .map(|email| ParticipantRow {
                        email: email.clone(),
                        remove: ParticipantRef::new(name, email.clone()),
                    })
                    .collect(),
            )
        };

        Self {
            name: name.to_string(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            max_participants: activity.max_participants,
            spots_left: activity.spots_left(),
            participants,
        }
    }

    pub fn participant_count(&self) -> usize {
        match &self.participants {
            ParticipantList::Empty => 0,
            ParticipantList::Rows(rows) => rows.len(),
        }
    }

    pub fn availability_line(&self) -> String {
        format!("{} of {} spots left", self.spots_left, self.max_participants)
    }

    pub fn participants_heading(&self) -> String {
        format!(
            "Participants ({}/{})",
            self.participant_count(),
            self.max_participants
        )
    }

    pub fn removal_controls(&self) -> impl Iterator<Item = &ParticipantRef> {
        let rows: &[ParticipantRow] = match &self.participants {
            ParticipantList::Empty => &[],
            ParticipantList::Rows(rows) => rows,
        };
        rows.iter().map(|row| &row.remove)
    }
}

impl fmt::Display for ActivityCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  {}", self.description)?;
        writeln!(f, "  Schedule: {}", self.schedule)?;
        writeln!(f, "  Availability: {}", self.availability_line())?;
        writeln!(f, "  {}", self.participants_heading())?;
        match &self.participants {
            ParticipantList::Empty => writeln!(f, "    {NO_PARTICIPANTS_NOTICE}"),
            ParticipantList::Rows(rows) => {
                for row in rows {
                    writeln!(f, "    - {}", row.email)?;
                }
                Ok(())
            }
        }
    }
}

pub fn render(roster: &Roster) -> RosterView {
    let mut view = RosterView {
        cards: Vec::with_capacity(roster.len()),
        options: Vec::with_capacity(roster.len()),
    };

    for (name, activity) in roster.iter() {
        view.cards.push(ActivityCard::from_activity(name, activity));
        view.options.push(ActivityOption {
            value: name.to_string(),
            label: name.to_string(),
        });
    }

    view
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
