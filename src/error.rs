use derive_more::{Display, Error};

/// Result alias used across the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Configuration faults detected when a profile is turned into a running player.
///
/// The tick loop itself never fails: numeric edge cases are clamped and overlay reads
/// outside the bitmap return the background bit.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A message needs more overlay columns than the bitmap can hold.
    #[display("message {index} needs {columns} overlay columns but only {max_columns} fit")]
    MessageTooLong {
        /// Position of the message in the profile's message list.
        index: usize,
        /// Columns the padded message needs.
        columns: usize,
        /// Column capacity of the overlay bitmap.
        max_columns: usize,
    },
    /// The profile lists no messages.
    #[display("profile must list at least one message")]
    EmptyMessageList,
    /// The profile lists no speed steps.
    #[display("profile must list at least one speed step")]
    EmptySpeedList,
    /// A color cycle bound to a button is empty.
    #[display("profile color cycles must not be empty")]
    EmptyColorCycle,
    /// The display sink height does not match the overlay height.
    #[display("display is {actual} rows tall but the overlay was built for {expected}")]
    DisplaySizeMismatch {
        /// Overlay height in rows.
        expected: usize,
        /// Display height in rows.
        actual: usize,
    },
}
