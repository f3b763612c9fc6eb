//! Static studio content: services, team, and the engagement process.
//! Embedded at build time and parsed once at startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One service offering. Serialized camelCase for the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Service {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub full_description: String,
    pub benefits: Vec<String>,
    pub process: Vec<ProcessPhase>,
    pub tools: Vec<String>,
    pub icon: String,
    pub path: String,
    pub image: String,
}

/// One phase of a single service engagement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessPhase {
    pub step: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub specialization: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub contact: String,
    pub image: String,
}

/// One step of the studio-wide delivery process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessStep {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct CatalogData {
    services: Vec<Service>,
    team: Vec<TeamMember>,
    process: Vec<ProcessStep>,
}

/// Parsed studio catalog.
#[derive(Debug)]
pub struct Catalog {
    services: Vec<Service>,
    team: Vec<TeamMember>,
    process: Vec<ProcessStep>,
}

impl Catalog {
    /// Parses the embedded data. Failure means the embedded TOML itself is
    /// broken, so callers treat this as fatal.
    pub fn load() -> Result<Self> {
        let data: CatalogData =
            toml::from_str(include_str!("data.toml")).context("embedded catalog data")?;
        Ok(Self {
            services: data.services,
            team: data.team,
            process: data.process,
        })
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn team(&self) -> &[TeamMember] {
        &self.team
    }

    pub fn process(&self) -> &[ProcessStep] {
        &self.process
    }

    /// Resolves a service by the last segment of its route path, accepting
    /// the record id as an alias. The `optimization` record routes under the
    /// `performance-optimization` segment, so the two differ.
    pub fn service_by_segment(&self, segment: &str) -> Option<&Service> {
        self.services
            .iter()
            .find(|s| s.path.rsplit('/').next() == Some(segment) || s.id == segment)
    }

    pub fn team_member(&self, id: &str) -> Option<&TeamMember> {
        self.team.iter().find(|m| m.id == id)
    }
}
