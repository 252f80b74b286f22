use thiserror::Error;
use tracing::{info, warn};

use crate::data::offer_repository::OfferRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::offer::NewOffer;
use crate::tsv::factory::{ImportUser, OfferDraft};
use crate::tsv::reader::{ReadError, RowOutcome, TsvOfferReader};

use super::user_service::UserService;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("import aborted: {0}")]
    Storage(DomainError),
}

/// Tally of one import run. Skipped rows were logged individually.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

pub struct ImportService<O: OfferRepository, U: UserRepository> {
    offers: O,
    users: UserService<U>,
}

impl<O: OfferRepository, U: UserRepository> ImportService<O, U> {
    pub fn new(offers: O, users: UserService<U>) -> Self {
        Self { offers, users }
    }

    /// Reads the file and persists every accepted row. Row-level problems
    /// never stop the run; a storage failure does.
    pub async fn import_file(
        &self,
        reader: &TsvOfferReader,
        known_users: &[ImportUser],
    ) -> Result<ImportReport, ImportError> {
        let outcomes = reader.read(known_users)?;
        info!(path = %reader.path().display(), rows = outcomes.len(), "import started");
        self.import_rows(outcomes).await.map_err(ImportError::Storage)
    }

    pub async fn import_rows(
        &self,
        outcomes: Vec<RowOutcome>,
    ) -> Result<ImportReport, DomainError> {
        let mut report = ImportReport::default();

        for outcome in outcomes {
            let draft = match outcome.result {
                Ok(draft) => draft,
                Err(rejection) => {
                    warn!(line = outcome.line, %rejection, "row skipped");
                    report.skipped += 1;
                    continue;
                }
            };

            match self.persist(draft).await {
                Ok(()) => report.imported += 1,
                // A storage-level failure would fail every remaining row
                // the same way, so the run stops there.
                Err(err @ DomainError::Unexpected(_)) => return Err(err),
                Err(err) => {
                    warn!(line = outcome.line, error = %err, "row skipped");
                    report.skipped += 1;
                }
            }
        }

        info!(
            imported = report.imported,
            skipped = report.skipped,
            "import finished"
        );
        Ok(report)
    }

    async fn persist(&self, draft: OfferDraft) -> Result<(), DomainError> {
        let owner = self.users.find_or_create(&draft.user).await?;

        let offer = NewOffer {
            title: draft.title,
            description: draft.description,
            publish_date: draft.publish_date,
            city: draft.city,
            preview_image: draft.preview_image,
            images: draft.images,
            is_premium: draft.is_premium,
            is_favorite: draft.is_favorite,
            rating: draft.rating,
            property_type: draft.property_type,
            rooms: draft.rooms,
            guests: draft.guests,
            price: draft.price,
            amenities: draft.amenities,
            user_id: owner.id,
            comments_count: draft.comments_count,
            location: draft.location,
        }
        .validate()?;

        let stored = self.offers.create_offer(offer).await?;
        info!(offer_id = stored.id, title = %stored.title, "offer imported");
        Ok(())
    }
}
