//! The read-side access decision engine.

use crate::decision::{Decision, Denial, Grant, Operation};
use crate::error::AccessResult;
use crate::identity::Caller;
use crate::policy;
use docunest_blobstore::StorageProvider;
use docunest_crypto::PasswordVerifier;
use docunest_model::DocumentSummary;
use docunest_storage::DocumentRepository;
use docunest_types::DocumentId;
use std::sync::Arc;
use tracing::debug;

/// Decides per request whether a caller may see, view or download a document.
///
/// Stateless apart from its collaborators; share it behind an `Arc`.
#[derive(Clone)]
pub struct AccessEngine {
    documents: Arc<dyn DocumentRepository>,
    storage: Arc<dyn StorageProvider>,
    verifier: PasswordVerifier,
}

impl AccessEngine {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        storage: Arc<dyn StorageProvider>,
        verifier: PasswordVerifier,
    ) -> Self {
        Self {
            documents,
            storage,
            verifier,
        }
    }

    /// Decides a single request.
    ///
    /// `password` is only consulted for a non-owner's download of a public,
    /// protected document. Errors are reserved for persistence or storage
    /// failures.
    pub fn decide(
        &self,
        caller: &Caller,
        id: &DocumentId,
        operation: Operation,
        password: Option<&str>,
    ) -> AccessResult<Decision> {
        let Some(record) = self.documents.find_document(id)? else {
            debug!(document = %id, %operation, outcome = %Denial::NotFound, "access decided");
            return Ok(Decision::Deny(Denial::NotFound));
        };

        if let Err(denial) = policy::evaluate(&record, caller, operation, password, |c, t| {
            self.verifier.verify(c, t)
        }) {
            debug!(document = %id, %operation, outcome = %denial, "access decided");
            return Ok(Decision::Deny(denial));
        }

        let summary = DocumentSummary::from(&record);
        let grant = match operation {
            Operation::Metadata => Grant::Metadata { summary },
            Operation::View => Grant::View {
                summary,
                locator: self.storage.resolve_locator(&record)?,
            },
            Operation::Download => Grant::Download {
                summary,
                locator: self.storage.resolve_locator(&record)?,
            },
        };
        debug!(
            document = %id,
            %operation,
            owner = caller.owns(&record),
            outcome = "allow",
            "access decided"
        );
        Ok(Decision::Allow(grant))
    }

    /// Every public document, newest first. Never includes private ones,
    /// whoever asks.
    pub fn list_public(&self) -> AccessResult<Vec<DocumentSummary>> {
        Ok(self
            .documents
            .list_public()?
            .iter()
            .map(DocumentSummary::from)
            .collect())
    }
}
