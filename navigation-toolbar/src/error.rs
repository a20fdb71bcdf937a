/// Precondition faults raised by the header engine.
///
/// These indicate an integration bug (the container or recycler was used in a state it does
/// not support), not a recoverable runtime condition. Out-of-range scroll targets and calls made
/// before the first layout are *not* errors: they are ignored.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    /// A recycler operation needed an adapter and none is attached.
    #[error("no adapter attached to the header container")]
    NoAdapter,
    /// An attached child has no bound position.
    #[error("attached child {child} has no bound view holder position")]
    MissingViewHolder { child: usize },
}

pub type Result<T, E = HeaderError> = core::result::Result<T, E>;
