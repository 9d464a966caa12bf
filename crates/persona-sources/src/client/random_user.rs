//! randomuser.me 클라이언트.

use async_trait::async_trait;
use persona_core::{compose_address, locale_date, Person};
use serde::Deserialize;
use tracing::debug;

use super::{endpoint, ErrorBody, UpstreamClient};
use crate::traits::{PersonSource, SourceResult};
use crate::SourceError;

const NAME: &str = "randomuser";

// ============================================================================
// 응답 타입
// ============================================================================

#[derive(Debug, Deserialize)]
struct RandomUserResponse {
    results: Vec<RandomUserRecord>,
}

#[derive(Debug, Deserialize)]
struct RandomUserRecord {
    gender: String,
    name: RecordName,
    location: RecordLocation,
    dob: RecordDob,
    picture: RecordPicture,
}

#[derive(Debug, Deserialize)]
struct RecordName {
    first: String,
    last: String,
}

#[derive(Debug, Deserialize)]
struct RecordLocation {
    street: RecordStreet,
    city: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct RecordStreet {
    number: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RecordDob {
    date: String,
    age: u32,
}

#[derive(Debug, Deserialize)]
struct RecordPicture {
    large: String,
}

#[derive(Debug, Deserialize)]
struct RandomUserError {
    error: Option<String>,
}

impl ErrorBody for RandomUserError {
    fn into_message(self) -> Option<String> {
        self.error
    }
}

impl TryFrom<RandomUserRecord> for Person {
    type Error = SourceError;

    fn try_from(record: RandomUserRecord) -> Result<Self, Self::Error> {
        let date_of_birth = locale_date(&record.dob.date)
            .ok_or_else(|| SourceError::Parse(format!("Invalid date of birth: {}", record.dob.date)))?;

        Ok(Person {
            first_name: record.name.first,
            last_name: record.name.last,
            gender: record.gender,
            picture: record.picture.large,
            age: record.dob.age,
            date_of_birth,
            city: record.location.city,
            address: compose_address(record.location.street.number, &record.location.street.name),
            country: record.location.country,
        })
    }
}

// ============================================================================
// 클라이언트
// ============================================================================

/// randomuser.me 인물 소스.
#[derive(Clone)]
pub struct RandomUserClient {
    http: UpstreamClient,
    base_url: String,
}

impl RandomUserClient {
    /// 새 클라이언트 생성.
    pub fn new(http: UpstreamClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PersonSource for RandomUserClient {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch_person(&self) -> SourceResult<Person> {
        let url = endpoint(&self.base_url, &["api", ""])?;
        let response: RandomUserResponse = self
            .http
            .get_json::<_, RandomUserError>(NAME, url)
            .await?;

        let record = response
            .results
            .into_iter()
            .next()
            .ok_or(SourceError::MissingField("results[0]"))?;

        let person = Person::try_from(record)?;
        debug!(country = %person.country, "Fetched random person");

        Ok(person)
    }
}
