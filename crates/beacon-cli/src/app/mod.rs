//! Interactive session: state, transitions and the command executor.

pub mod command;
pub mod controller;
pub mod event;
pub mod executor;
pub mod list;
pub mod menu;
pub mod session;
pub mod text_input;
pub mod wizard;

pub use command::Command;
pub use controller::dispatch;
pub use event::{Event, GeneratedReport, Key, Ticket};
pub use executor::Executor;
pub use list::{ListCursor, PAGE_SIZE};
pub use menu::{MenuAction, MenuEntry, MenuItem, derive_menu};
pub use session::{Screen, Session, SetupRow};
pub use wizard::{Wizard, WizardOutcome, WizardStep};
