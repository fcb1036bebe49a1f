//! Number allocation and document header operations.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use super::error::NumberingError;
use super::types::{
    CreateDocumentInput, HeaderPatch, NewDocumentRow, OfficialDocument, next_number,
};

/// Repository trait for document persistence.
///
/// Implemented by the db crate. `insert` must map the store's
/// UNIQUE (year, number) violation to `NumberingError::DuplicateNumber`
/// rather than succeeding or surfacing a generic error; the allocator's
/// retry loop depends on it.
pub trait DocumentRepository: Send + Sync {
    /// Highest correlative number currently used for a year, if any.
    fn max_number_for_year(
        &self,
        year: i32,
    ) -> impl std::future::Future<Output = Result<Option<i32>, NumberingError>> + Send;

    /// Insert a new document row.
    fn insert(
        &self,
        row: NewDocumentRow,
    ) -> impl std::future::Future<Output = Result<OfficialDocument, NumberingError>> + Send;

    /// Find a document by ID.
    fn find_by_id(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<OfficialDocument>, NumberingError>> + Send;

    /// All documents for a year, highest number first.
    fn list_by_year(
        &self,
        year: i32,
    ) -> impl std::future::Future<Output = Result<Vec<OfficialDocument>, NumberingError>> + Send;

    /// Update the editable header fields (description, document date).
    fn update_header(
        &self,
        id: Uuid,
        patch: HeaderPatch,
    ) -> impl std::future::Future<Output = Result<OfficialDocument, NumberingError>> + Send;
}

/// Allocates year-scoped correlative numbers and creates documents.
pub struct NumberAllocator<R: DocumentRepository> {
    repo: Arc<R>,
    max_attempts: u32,
}

impl<R: DocumentRepository> NumberAllocator<R> {
    /// Bounded retry: enough to absorb a losing race, small enough to
    /// fail fast under sustained contention.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Create a new allocator with the default attempt bound.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the attempt bound.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Create a new document with the next free correlative number.
    ///
    /// Each attempt re-reads the current maximum for the year, so a
    /// losing race never skips past the number the user expects.
    ///
    /// # Errors
    ///
    /// - `InvalidYear` when `year` is not four digits
    /// - `AttemptsExhausted` when every attempt lost the insert race
    /// - `Repository` on any other store failure
    pub async fn create(
        &self,
        input: CreateDocumentInput,
    ) -> Result<OfficialDocument, NumberingError> {
        if !(1000..=9999).contains(&input.year) {
            return Err(NumberingError::InvalidYear(input.year));
        }

        for attempt in 1..=self.max_attempts {
            let current_max = self.repo.max_number_for_year(input.year).await?;
            let number = next_number(current_max);

            let row = NewDocumentRow {
                id: Uuid::new_v4(),
                number,
                year: input.year,
                description: input.description.clone(),
                created_date: input.created_date,
                author_name: input.author_name.clone(),
            };

            match self.repo.insert(row).await {
                Ok(document) => return Ok(document),
                Err(NumberingError::DuplicateNumber { year, number }) => {
                    warn!(
                        year,
                        number, attempt, "correlative number taken, retrying with fresh read"
                    );
                }
                Err(other) => return Err(other),
            }
        }

        Err(NumberingError::AttemptsExhausted {
            year: input.year,
            attempts: self.max_attempts,
        })
    }

    /// Documents for a year, optionally filtered by a free-text search
    /// over the number and description.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn list(
        &self,
        year: i32,
        search: Option<&str>,
    ) -> Result<Vec<OfficialDocument>, NumberingError> {
        let documents = self.repo.list_by_year(year).await?;

        let Some(query) = search.map(str::trim).filter(|q| !q.is_empty()) else {
            return Ok(documents);
        };

        let query = query.to_lowercase();
        Ok(documents
            .into_iter()
            .filter(|d| {
                d.number.to_string().contains(&query)
                    || d.description.to_lowercase().contains(&query)
            })
            .collect())
    }

    /// Fetch a document by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the ID does not resolve.
    pub async fn get(&self, id: Uuid) -> Result<OfficialDocument, NumberingError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(NumberingError::NotFound(id))
    }

    /// Update the editable header fields of a document.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the ID does not resolve.
    pub async fn update_header(
        &self,
        id: Uuid,
        patch: HeaderPatch,
    ) -> Result<OfficialDocument, NumberingError> {
        self.repo.update_header(id, patch).await
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // next_number is total, gapless, and never reuses the maximum.
    proptest! {
        #[test]
        fn prop_next_number_strictly_above_max(max in 1i32..1_000_000) {
            prop_assert_eq!(next_number(Some(max)), max + 1);
        }
    }

    // Folding next_number over an empty year yields 1..=n.
    proptest! {
        #[test]
        fn prop_sequence_is_gapless(n in 1usize..200) {
            let mut max = None;
            let mut produced = Vec::with_capacity(n);
            for _ in 0..n {
                let next = next_number(max);
                produced.push(next);
                max = Some(next);
            }
            let expected: Vec<i32> = (1..=i32::try_from(n).unwrap()).collect();
            prop_assert_eq!(produced, expected);
        }
    }
}
