//! Shelter model as sent by the API.
//!
//! ```text
//! {
//!   "id": "1",
//!   "name": "Refugio Norte",
//!   "email": "norte@example.net",
//!   "photoUrl": "",
//!   "address": { "latitude": 40.5, "longitude": -3.7 },
//!   "shelterType": "SHELTER_POINT",
//!   "phoneNumber": "+34 600 000 000"
//! }
//! ```
//!

use serde::{Deserialize, Serialize};
use strum::{EnumString, VariantNames};
use tabled::builder::Builder;
use tabled::settings::Style;

use petshelter_common::Location;

/// Shelter category
///
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    EnumString,
    Eq,
    PartialEq,
    Serialize,
    strum::Display,
    VariantNames,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ShelterType {
    /// Private individual
    #[default]
    Particular,
    /// Town council
    LocalGovernment,
    Veterinary,
    /// Proper animal shelter
    ShelterPoint,
    KiwokoStore,
    /// Anything the API sends we do not know about
    #[serde(other)]
    Unknown,
}

impl ShelterType {
    /// Name of the map marker icon for this type
    ///
    pub fn icon(&self) -> &'static str {
        match self {
            ShelterType::Particular => "particular",
            ShelterType::LocalGovernment => "towncouncil",
            ShelterType::Veterinary => "veterinary",
            ShelterType::ShelterPoint => "animalshelter",
            ShelterType::KiwokoStore => "kiwoko",
            ShelterType::Unknown => "questionmark",
        }
    }
}

/// Wire representation of a shelter position
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Address {
    pub latitude: f64,
    pub longitude: f64,
}

impl Address {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Address {
            latitude,
            longitude,
        }
    }

    /// Walking directions to this address for the navigation app
    ///
    pub fn navigation_uri(&self) -> String {
        format!(
            "google.navigation:q={},{}&mode=w",
            self.latitude, self.longitude
        )
    }
}

impl From<Address> for Location {
    fn from(a: Address) -> Self {
        Location::new(a.latitude, a.longitude)
    }
}

impl From<Location> for Address {
    fn from(l: Location) -> Self {
        Address::new(l.lat, l.lon)
    }
}

/// One shelter.  Never modified in place, edits produce a new value.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub photo_url: String,
    pub address: Address,
    #[serde(default)]
    pub shelter_type: ShelterType,
    #[serde(default)]
    pub phone_number: String,
}

impl Shelter {
    #[inline]
    pub fn location(&self) -> Location {
        self.address.into()
    }

    /// URI to call the shelter
    ///
    pub fn dial_uri(&self) -> String {
        format!("tel:{}", self.phone_number)
    }
}

/// List shelters as a table
///
#[tracing::instrument(skip(data))]
pub fn list_shelters(data: &[Shelter]) -> String {
    let header = vec!["Id", "Name", "Type", "Lat/Lon", "Phone"];

    let mut builder = Builder::default();
    builder.push_record(header);

    data.iter().for_each(|s| {
        let point = format!("{:.4}, {:.4}", s.address.latitude, s.address.longitude);
        builder.push_record(vec![
            s.id.clone(),
            s.name.clone(),
            s.shelter_type.to_string(),
            point,
            s.phone_number.clone(),
        ]);
    });

    let allf = builder.build().with(Style::modern()).to_string();
    format!("List all shelters ({}):\n{allf}", data.len())
}

/// List known shelter types with their marker
///
pub fn list_types() -> String {
    let mut builder = Builder::default();
    builder.push_record(vec!["Type", "Icon"]);

    ShelterType::VARIANTS.iter().for_each(|name| {
        let icon = name
            .parse::<ShelterType>()
            .map(|t| t.icon())
            .unwrap_or("questionmark");
        builder.push_record(vec![name.to_string(), icon.to_string()]);
    });
    let allf = builder.build().with(Style::modern()).to_string();
    format!("List all shelter types:\n{allf}")
}
