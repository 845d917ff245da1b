//! Static portfolio tables.
//!
//! Everything the deck shows lives here as in-memory data: the profile, the
//! experience and education histories, certificates, and projects. There is
//! no external API; editing this file is how the portfolio is updated.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub tagline: &'static str,
    pub location: &'static str,
    pub email: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Experience {
    pub role: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub summary: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Education {
    pub degree: &'static str,
    pub school: &'static str,
    pub period: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Certificate {
    pub title: &'static str,
    pub issuer: &'static str,
    pub year: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub name: &'static str,
    pub description: &'static str,
    pub stack: &'static str,
}

const PROFILE: Profile = Profile {
    name: "Alex Moreau",
    tagline: "Systems-minded software engineer",
    location: "Lyon, France",
    email: "alex@moreau.dev",
};

const EXPERIENCES: &[Experience] = &[
    Experience {
        role: "Senior Software Engineer",
        company: "Helioscale",
        period: "2022 - present",
        summary: "Rendering and tooling for a real-time telemetry platform",
    },
    Experience {
        role: "Software Engineer",
        company: "Cartesian Labs",
        period: "2019 - 2022",
        summary: "Built the map-tile pipeline and its on-call tooling",
    },
    Experience {
        role: "Junior Developer",
        company: "Atelier Numerique",
        period: "2017 - 2019",
        summary: "Client web applications and internal dashboards",
    },
];

const EDUCATION: &[Education] = &[
    Education {
        degree: "MSc Computer Science",
        school: "INSA Lyon",
        period: "2015 - 2017",
    },
    Education {
        degree: "BSc Computer Science",
        school: "Universite Claude Bernard",
        period: "2012 - 2015",
    },
];

const CERTIFICATES: &[Certificate] = &[
    Certificate {
        title: "Certified Kubernetes Administrator",
        issuer: "CNCF",
        year: "2023",
    },
    Certificate {
        title: "AWS Solutions Architect Associate",
        issuer: "Amazon Web Services",
        year: "2021",
    },
];

const PROJECTS: &[Project] = &[
    Project {
        name: "vitrine",
        description: "This animated portfolio deck",
        stack: "Rust",
    },
    Project {
        name: "tilecast",
        description: "Streaming map-tile diff server",
        stack: "Rust, PostGIS",
    },
    Project {
        name: "pulseboard",
        description: "Terminal dashboard for on-call rotations",
        stack: "Rust, TUI",
    },
];

/// Stable identifiers for the rotating hero sections.
pub const SECTION_IDS: &[&str] = &["experience", "education", "certificates", "projects"];

pub fn profile() -> &'static Profile {
    &PROFILE
}

pub fn experiences() -> &'static [Experience] {
    EXPERIENCES
}

pub fn education() -> &'static [Education] {
    EDUCATION
}

pub fn certificates() -> &'static [Certificate] {
    CERTIFICATES
}

pub fn projects() -> &'static [Project] {
    PROJECTS
}

pub fn section_ids() -> Vec<String> {
    SECTION_IDS.iter().map(|id| id.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_populated() {
        assert!(!profile().name.is_empty());
        assert!(!experiences().is_empty());
        assert!(!education().is_empty());
        assert!(!certificates().is_empty());
        assert!(!projects().is_empty());
    }

    #[test]
    fn section_ids_are_unique() {
        let mut ids = section_ids();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SECTION_IDS.len());
    }
}
