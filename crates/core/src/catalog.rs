//! Modules listed on the home page and in the sidebar.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ErpError;

/// The closed set of icons the module cards use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Calendar,
    BookOpen,
    Laptop,
    #[serde(rename = "building-2")]
    Building2,
    Users,
    Wallet,
    FileText,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Calendar => "calendar",
            Icon::BookOpen => "book-open",
            Icon::Laptop => "laptop",
            Icon::Building2 => "building-2",
            Icon::Users => "users",
            Icon::Wallet => "wallet",
            Icon::FileText => "file-text",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Icon {
    type Err = ErpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calendar" => Ok(Icon::Calendar),
            "book-open" => Ok(Icon::BookOpen),
            "laptop" => Ok(Icon::Laptop),
            "building-2" => Ok(Icon::Building2),
            "users" => Ok(Icon::Users),
            "wallet" => Ok(Icon::Wallet),
            "file-text" => Ok(Icon::FileText),
            other => Err(ErpError::Validation(format!("Unknown icon '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    Available,
    ComingSoon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Module {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: Icon,
    pub description: &'static str,
    pub path: &'static str,
    pub availability: Availability,
}

pub static MODULES: [Module; 8] = [
    Module {
        id: "timetable",
        name: "Gestion des Emplois du Temps",
        icon: Icon::Calendar,
        description: "Planification et organisation des cours et des horaires académiques.",
        path: "/modules/timetable",
        availability: Availability::Available,
    },
    Module {
        id: "courses",
        name: "Gestion des Cours",
        icon: Icon::BookOpen,
        description: "Création et gestion des cours et des programmes académiques.",
        path: "/modules/courses",
        availability: Availability::Available,
    },
    Module {
        id: "equipment",
        name: "Gestion des Équipements",
        icon: Icon::Laptop,
        description: "Inventaire et maintenance des équipements de l'université.",
        path: "/modules/equipment",
        availability: Availability::Available,
    },
    Module {
        id: "classrooms",
        name: "Gestion des Salles",
        icon: Icon::Building2,
        description: "Allocation et suivi des salles de cours et amphithéâtres.",
        path: "/modules/classrooms",
        availability: Availability::Available,
    },
    Module {
        id: "teachers",
        name: "Gestion des Enseignants",
        icon: Icon::Users,
        description: "Informations et planning des enseignants et du personnel académique.",
        path: "/modules/teachers",
        availability: Availability::Available,
    },
    Module {
        id: "library",
        name: "Gestion des Bibliothèques",
        icon: Icon::BookOpen,
        description: "Catalogue et prêt d'ouvrages de la bibliothèque universitaire.",
        path: "/modules/library",
        availability: Availability::ComingSoon,
    },
    Module {
        id: "finance",
        name: "Gestion des Finances",
        icon: Icon::Wallet,
        description: "Suivi des transactions financières et des budgets départementaux.",
        path: "/modules/finance",
        availability: Availability::ComingSoon,
    },
    Module {
        id: "exams",
        name: "Gestion des Examens",
        icon: Icon::FileText,
        description: "Organisation et résultats des examens et évaluations.",
        path: "/modules/exams",
        availability: Availability::ComingSoon,
    },
];

pub fn find_module(id: &str) -> Option<&'static Module> {
    MODULES.iter().find(|module| module.id == id)
}

pub fn available_modules() -> impl Iterator<Item = &'static Module> {
    MODULES
        .iter()
        .filter(|module| module.availability == Availability::Available)
}
