use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CERTIFICATIONS: [&str; 3] = ["PMP", "CAPM", "Both"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Certification {
    #[serde(rename = "PMP")]
    Pmp,
    #[serde(rename = "CAPM")]
    Capm,
    Both,
}

impl Certification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Certification::Pmp => "PMP",
            Certification::Capm => "CAPM",
            Certification::Both => "Both",
        }
    }
}

impl fmt::Display for Certification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Certification {
    type Err = ();

    // Exact match only, "pmp" is not a certification.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PMP" => Ok(Certification::Pmp),
            "CAPM" => Ok(Certification::Capm),
            "Both" => Ok(Certification::Both),
            _ => Err(()),
        }
    }
}

/// Validated registration data, ready to be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRsvp {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub certification: Certification,
}

/// A stored registration. Never mutated once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub certification: Certification,
    pub created_at: DateTime<Utc>,
}

impl Rsvp {
    pub fn from_new(new_rsvp: NewRsvp, id: u64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: new_rsvp.first_name,
            last_name: new_rsvp.last_name,
            email: new_rsvp.email,
            certification: new_rsvp.certification,
            created_at,
        }
    }
}

#[derive(Serialize)]
pub struct Created<'a> {
    pub message: &'a str,
    pub data: Rsvp,
}
