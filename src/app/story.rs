//! The scripted narrative: which caption shows when, and which group of
//! bubbles is lit up while it is on screen.

use crate::app::scales::{BASE_RADIUS, FOCUS_RADIUS};
use crate::app::timeline::{Fill, Subject, TimelineAction, TimelineEntry};
use crate::data::AcStatus;

pub const FEATURED_BROKEN: &str = "James Allen Dickinson";
pub const FEATURED_OFF: &str = "Erminia Quihuis Chacon";
pub const FEATURED_NONE: &str = "Humberto Montoya Ayala";
pub const FEATURED_UNKNOWN: &str = "Candace Dale Bader";

const INTRO: &str = "Every bubble is one person who died of heat inside their own home \
in Maricopa County, Arizona. Indoors is supposed to be the safe place. For the people \
on this chart, it wasn't.";

const DICKINSON: &str = "James Allen Dickinson was 71. The thermostat in his Phoenix \
house read 107 degrees when he was found. His air conditioner had stopped working.";

const BROKEN: &str = "He was not alone. Each colored bubble is a person whose air \
conditioning was broken when they died, a repair that never came in time.";

const OFF: &str = "Others had working units that were simply off. Erminia Quihuis \
Chacon, 82, kept hers off to save on the electric bill through the hottest weeks \
of the year.";

const NONE: &str = "Some homes had no air conditioning at all. Humberto Montoya \
Ayala lived, and died, without a unit in a city where summer nights stay above \
90 degrees.";

const UNKNOWN: &str = "And for many, like Candace Dale Bader, investigators could \
never determine what role the air conditioning played. The record just says: unknown.";

pub const END_QUOTE: &str = "\"These are preventable deaths. Nobody should die of \
heat indoors.\" Every color marks what stood between one person and a cooler room.";

fn caption(delay_secs: f32, text: &'static str) -> TimelineEntry {
    TimelineEntry {
        delay_secs,
        action: TimelineAction::ShowCaption(text),
    }
}

/// One narrative beat: light up a status group, feature one decedent at
/// full opacity, dim everyone else.
fn group_stage(delay_secs: f32, status: AcStatus, featured: &'static str) -> [TimelineEntry; 6] {
    let at = |action| TimelineEntry { delay_secs, action };
    [
        at(TimelineAction::Recolor {
            subject: Subject::All,
            fill: Fill::Neutral,
        }),
        at(TimelineAction::Resize {
            subject: Subject::All,
            radius: BASE_RADIUS,
        }),
        at(TimelineAction::Recolor {
            subject: Subject::Status(status),
            fill: Fill::ByStatus,
        }),
        at(TimelineAction::Resize {
            subject: Subject::Status(status),
            radius: FOCUS_RADIUS,
        }),
        at(TimelineAction::Fade {
            subject: Subject::All,
            opacity: 0.5,
        }),
        at(TimelineAction::Fade {
            subject: Subject::Named(featured),
            opacity: 1.0,
        }),
    ]
}

pub fn script() -> Vec<TimelineEntry> {
    let mut entries = vec![caption(0.0, INTRO)];

    // single featured decedent, everyone else stays grey
    entries.push(caption(10.0, DICKINSON));
    entries.push(TimelineEntry {
        delay_secs: 10.0,
        action: TimelineAction::Recolor {
            subject: Subject::Named(FEATURED_BROKEN),
            fill: Fill::ByStatus,
        },
    });
    entries.push(TimelineEntry {
        delay_secs: 10.0,
        action: TimelineAction::Resize {
            subject: Subject::Named(FEATURED_BROKEN),
            radius: FOCUS_RADIUS,
        },
    });

    entries.push(caption(17.0, BROKEN));
    entries.extend(group_stage(17.0, AcStatus::Broken, FEATURED_BROKEN));

    entries.push(caption(24.0, OFF));
    entries.extend(group_stage(24.0, AcStatus::Off, FEATURED_OFF));

    entries.push(caption(40.0, NONE));
    entries.extend(group_stage(40.0, AcStatus::None, FEATURED_NONE));

    entries.push(caption(60.0, UNKNOWN));
    entries.extend(group_stage(60.0, AcStatus::Unknown, FEATURED_UNKNOWN));

    // terminal state: everything colored by status, uniform size
    let end = |action| TimelineEntry {
        delay_secs: 80.0,
        action,
    };
    entries.push(end(TimelineAction::HideCaption));
    entries.push(end(TimelineAction::Recolor {
        subject: Subject::All,
        fill: Fill::ByStatus,
    }));
    entries.push(end(TimelineAction::Resize {
        subject: Subject::All,
        radius: BASE_RADIUS,
    }));
    entries.push(end(TimelineAction::Fade {
        subject: Subject::All,
        opacity: 1.0,
    }));

    entries
}
