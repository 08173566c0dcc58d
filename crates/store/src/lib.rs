//! Repository layer over a persistent sudoku puzzle store.
//!
//! `puzzle-store` wires storage backends, the row-to-domain mapping, and a
//! change-notification bus into one async facade. Consumers hold a
//! [`PuzzleRepository`] handle to read, filter, and mutate puzzle state and
//! to subscribe to live listings that re-emit whenever data changes.
//!
//! Modules are organized by responsibility:
//! - [`dao`] defines the storage contract, with [`memory`] and [`file`]
//!   backends
//! - [`repository`] exposes the facade consumers interact with
//! - [`events`] provides the broadcast bus that drives [`live`] queries
//! - [`row`] and [`strings`] cover the storage row and its mapping to the
//!   domain read model
//! - [`worker`] keeps the command loop internal to the crate
pub mod dao;
pub mod error;
pub mod events;
pub mod file;
pub mod live;
pub mod memory;
pub mod repository;
pub mod row;
pub mod strings;

mod worker;

pub use dao::PuzzleDao;
pub use error::{Result, StoreError};
pub use events::{ChangeBus, StoreChange};
pub use file::FilePuzzleStore;
pub use live::LiveQuery;
pub use memory::MemoryPuzzleStore;
pub use repository::PuzzleRepository;
pub use row::PuzzleRow;
pub use strings::{EnglishStrings, Strings};
