use super::{ApiClient, ApiResult};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RandomUserResponse {
    results: Vec<FakeIdentity>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FakeIdentity {
    pub name: PersonName,
    pub location: Location,
    pub email: String,
    pub login: Login,
    pub dob: DateOfBirth,
    pub phone: String,
    pub cell: String,
    pub picture: Picture,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PersonName {
    pub title: String,
    pub first: String,
    pub last: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Location {
    pub street: Street,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postcode: Value,
    pub coordinates: Coordinates,
    pub timezone: Timezone,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Street {
    pub number: Value,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Timezone {
    pub offset: String,
    pub description: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DateOfBirth {
    pub age: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Picture {
    pub large: String,
}

impl FakeIdentity {
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.name.title, self.name.first, self.name.last)
    }

    pub fn address(&self) -> String {
        let location = &self.location;
        format!(
            "{}, {}, {}, {}, {}, {}",
            scalar(&location.street.number),
            location.street.name,
            location.city,
            location.state,
            location.country,
            scalar(&location.postcode)
        )
    }

    pub fn coordinates(&self) -> String {
        format!(
            "{}, {}",
            self.location.coordinates.latitude, self.location.coordinates.longitude
        )
    }

    pub fn timezone(&self) -> String {
        format!(
            "{}, {}",
            self.location.timezone.offset, self.location.timezone.description
        )
    }
}

/// Postcodes and street numbers come back either as numbers or strings
fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl ApiClient {
    /// Returns the first generated identity, `None` if the API sent an empty batch
    pub async fn fake_identity(&self) -> ApiResult<Option<FakeIdentity>> {
        let url = format!("{}/api/", self.endpoints.random_user);
        let response: RandomUserResponse = self.get_json(&url, &[]).await?;
        Ok(response.results.into_iter().next())
    }
}
