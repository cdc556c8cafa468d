use console_client::ConsoleClientError;
use thiserror::Error;

use crate::{EntityKind, MutationKind};

#[derive(Debug, Error)]
/// Enumerates supported `ShellError` values.
pub enum ShellError {
    #[error("failed to load proxy ui config: {0}")]
    ConfigLoad(#[source] ConsoleClientError),
    #[error("failed to fetch {}: {source}", entity.as_str())]
    EntityFetch {
        entity: EntityKind,
        #[source]
        source: ConsoleClientError,
    },
    #[error("{origin} may not request {}", mutation.as_str())]
    MutationRejected {
        origin: &'static str,
        mutation: MutationKind,
    },
}
