use log::debug;

use crate::app::scales::BASE_RADIUS;
use crate::data::{AcStatus, Record};

/// Which bubbles a timeline action touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subject {
    All,
    Status(AcStatus),
    Named(&'static str),
}

impl Subject {
    pub fn matches(self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => record.air_conditioning == status,
            Self::Named(name) => record.name == name,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    Neutral,
    ByStatus,
}

/// One-shot visual mutation, fired at a fixed elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimelineAction {
    ShowCaption(&'static str),
    HideCaption,
    Recolor { subject: Subject, fill: Fill },
    Resize { subject: Subject, radius: f32 },
    Fade { subject: Subject, opacity: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineEntry {
    pub delay_secs: f32,
    pub action: TimelineAction,
}

/// Target visual state of one bubble, before hover compositing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
    pub fill: Fill,
    pub radius: f32,
    pub opacity: f32,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            fill: Fill::Neutral,
            radius: BASE_RADIUS,
            opacity: 1.0,
        }
    }
}

/// Accumulated result of every timeline action applied so far.
/// Last writer wins on each attribute.
pub struct StoryStyle {
    pub caption: Option<&'static str>,
    pub nodes: Vec<NodeStyle>,
}

impl StoryStyle {
    pub fn new(node_count: usize) -> Self {
        Self {
            caption: None,
            nodes: vec![NodeStyle::default(); node_count],
        }
    }

    fn apply(&mut self, action: TimelineAction, records: &[Record]) {
        match action {
            TimelineAction::ShowCaption(text) => self.caption = Some(text),
            TimelineAction::HideCaption => self.caption = None,
            TimelineAction::Recolor { subject, fill } => {
                for (style, record) in self.nodes.iter_mut().zip(records) {
                    if subject.matches(record) {
                        style.fill = fill;
                    }
                }
            }
            TimelineAction::Resize { subject, radius } => {
                for (style, record) in self.nodes.iter_mut().zip(records) {
                    if subject.matches(record) {
                        style.radius = radius;
                    }
                }
            }
            TimelineAction::Fade { subject, opacity } => {
                for (style, record) in self.nodes.iter_mut().zip(records) {
                    if subject.matches(record) {
                        style.opacity = opacity;
                    }
                }
            }
        }
    }
}

/// Fixed narrative schedule. Delays are measured from dataset-ready and
/// are independent of the simulation and of user interaction.
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    cursor: usize,
}

impl Timeline {
    pub fn new(mut entries: Vec<TimelineEntry>) -> Self {
        // stable: entries sharing a delay keep their script order
        entries.sort_by(|a, b| a.delay_secs.total_cmp(&b.delay_secs));
        Self { entries, cursor: 0 }
    }

    /// Apply every entry whose delay has elapsed, in order. Returns the
    /// number of entries fired by this call.
    pub fn poll(&mut self, elapsed_secs: f32, style: &mut StoryStyle, records: &[Record]) -> usize {
        let mut fired = 0;
        while let Some(entry) = self.entries.get(self.cursor) {
            if entry.delay_secs > elapsed_secs {
                break;
            }
            debug!("timeline action at {}s: {:?}", entry.delay_secs, entry.action);
            style.apply(entry.action, records);
            self.cursor += 1;
            fired += 1;
        }
        fired
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    /// Delay of the next pending entry, if any. Lets the UI schedule a
    /// wakeup instead of repainting every frame while the story idles.
    pub fn next_delay_secs(&self) -> Option<f32> {
        self.entries.get(self.cursor).map(|entry| entry.delay_secs)
    }

    pub fn restart(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, status: AcStatus) -> Record {
        Record {
            name: name.to_owned(),
            age: None,
            temp: 100.0,
            year: 2018,
            gender: String::new(),
            air_conditioning: status,
        }
    }

    fn records() -> Vec<Record> {
        vec![
            record("first", AcStatus::Broken),
            record("second", AcStatus::Off),
        ]
    }

    #[test]
    fn entries_fire_in_nondecreasing_delay_order() {
        let timeline = Timeline::new(vec![
            TimelineEntry {
                delay_secs: 10.0,
                action: TimelineAction::HideCaption,
            },
            TimelineEntry {
                delay_secs: 0.0,
                action: TimelineAction::ShowCaption("intro"),
            },
        ]);

        for pair in timeline.entries.windows(2) {
            assert!(pair[0].delay_secs <= pair[1].delay_secs);
        }
    }

    #[test]
    fn poll_applies_exactly_the_elapsed_entries() {
        let records = records();
        let mut style = StoryStyle::new(records.len());
        let mut timeline = Timeline::new(vec![
            TimelineEntry {
                delay_secs: 0.0,
                action: TimelineAction::ShowCaption("intro"),
            },
            TimelineEntry {
                delay_secs: 5.0,
                action: TimelineAction::Resize {
                    subject: Subject::Named("first"),
                    radius: 15.0,
                },
            },
            TimelineEntry {
                delay_secs: 9.0,
                action: TimelineAction::HideCaption,
            },
        ]);

        assert_eq!(timeline.poll(4.9, &mut style, &records), 1);
        assert_eq!(style.caption, Some("intro"));
        assert_eq!(style.nodes[0].radius, BASE_RADIUS);

        assert_eq!(timeline.poll(5.0, &mut style, &records), 1);
        assert_eq!(style.nodes[0].radius, 15.0);
        assert_eq!(style.nodes[1].radius, BASE_RADIUS);
        assert!(!timeline.is_finished());
        assert_eq!(timeline.next_delay_secs(), Some(9.0));

        assert_eq!(timeline.poll(60.0, &mut style, &records), 1);
        assert_eq!(style.caption, None);
        assert!(timeline.is_finished());
        assert_eq!(timeline.next_delay_secs(), None);
    }

    #[test]
    fn same_delay_entries_apply_in_script_order() {
        let records = records();
        let mut style = StoryStyle::new(records.len());
        let mut timeline = Timeline::new(vec![
            TimelineEntry {
                delay_secs: 1.0,
                action: TimelineAction::Fade {
                    subject: Subject::All,
                    opacity: 0.5,
                },
            },
            TimelineEntry {
                delay_secs: 1.0,
                action: TimelineAction::Fade {
                    subject: Subject::Named("second"),
                    opacity: 1.0,
                },
            },
        ]);

        timeline.poll(1.0, &mut style, &records);
        assert_eq!(style.nodes[0].opacity, 0.5);
        assert_eq!(style.nodes[1].opacity, 1.0);
    }

    #[test]
    fn subjects_match_by_status_and_name() {
        let records = records();
        assert!(Subject::All.matches(&records[0]));
        assert!(Subject::Status(AcStatus::Broken).matches(&records[0]));
        assert!(!Subject::Status(AcStatus::Broken).matches(&records[1]));
        assert!(Subject::Named("second").matches(&records[1]));
        assert!(!Subject::Named("second").matches(&records[0]));
    }

    #[test]
    fn restart_replays_from_the_top() {
        let records = records();
        let mut style = StoryStyle::new(records.len());
        let mut timeline = Timeline::new(vec![TimelineEntry {
            delay_secs: 0.0,
            action: TimelineAction::ShowCaption("intro"),
        }]);

        timeline.poll(100.0, &mut style, &records);
        assert!(timeline.is_finished());

        timeline.restart();
        let mut fresh = StoryStyle::new(records.len());
        assert_eq!(timeline.poll(0.0, &mut fresh, &records), 1);
        assert_eq!(fresh.caption, Some("intro"));
    }
}
