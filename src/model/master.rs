use ahash::RandomState;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

use crate::model::id::{EntityId, lenient_integer};

pub type CourseId = EntityId;

/// `course_type` of courses that are not part of any competition.
pub const NON_COMPETITIVE_COURSE_TYPE: i64 = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub facility_name: String,
    pub course_type: Option<i64>,
}

impl Course {
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.course_type != Some(NON_COMPETITIVE_COURSE_TYPE)
    }

    /// Label shown in the course selector.
    #[must_use]
    pub fn display_label(&self) -> String {
        match (self.facility_name.is_empty(), self.name.is_empty()) {
            (false, false) => format!("{} {}", self.facility_name, self.name),
            (_, false) => self.name.clone(),
            (_, true) => format!("Course {}", self.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaddieRef {
    pub id: EntityId,
    pub name: String,
}

#[derive(Deserialize)]
struct RawCourse {
    course_id: EntityId,
    #[serde(default)]
    course_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_integer")]
    course_type: Option<i64>,
    #[serde(default)]
    facility_master: Option<RawFacility>,
}

#[derive(Deserialize)]
struct RawFacility {
    #[serde(default)]
    facility_name: Option<String>,
}

#[derive(Deserialize)]
struct RawCaddie {
    caddie_id: EntityId,
    #[serde(default)]
    caddie_name: Option<String>,
}

impl From<RawCourse> for Course {
    fn from(raw: RawCourse) -> Self {
        Self {
            id: raw.course_id,
            name: raw.course_name.unwrap_or_default(),
            facility_name: raw
                .facility_master
                .and_then(|f| f.facility_name)
                .unwrap_or_default(),
            course_type: raw.course_type,
        }
    }
}

impl From<RawCaddie> for CaddieRef {
    fn from(raw: RawCaddie) -> Self {
        Self {
            id: raw.caddie_id,
            name: raw.caddie_name.unwrap_or_default(),
        }
    }
}

/// Caddie names keyed by id. The first record for an id wins.
#[derive(Debug, Clone, Default)]
pub struct CaddieTable {
    names: HashMap<EntityId, String, RandomState>,
}

impl CaddieTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name to show for a ranking entry's caddie.
    ///
    /// Missing ids render as `-`; ids with no usable record render as the raw id.
    #[must_use]
    pub fn display_name(&self, caddie_id: Option<&EntityId>) -> String {
        match caddie_id {
            None => "-".to_string(),
            Some(id) if id.is_empty() => "-".to_string(),
            Some(id) => match self.names.get(id) {
                Some(name) if !name.is_empty() => name.clone(),
                _ => id.to_string(),
            },
        }
    }
}

impl FromIterator<CaddieRef> for CaddieTable {
    fn from_iter<I: IntoIterator<Item = CaddieRef>>(iter: I) -> Self {
        let mut names: HashMap<EntityId, String, RandomState> = HashMap::default();
        for caddie in iter {
            names.entry(caddie.id).or_insert(caddie.name);
        }
        Self { names }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MasterData {
    pub courses: Vec<Course>,
    pub caddies: Vec<CaddieRef>,
}

impl MasterData {
    /// Reads `course_master` and `caddie_master` from the master payload.
    /// Missing or non-list fields read as empty and malformed entries are skipped.
    #[must_use]
    pub fn from_response(body: &Value) -> Self {
        Self {
            courses: lenient_list::<RawCourse>(body.get("course_master"), "course_master")
                .into_iter()
                .map(Course::from)
                .collect(),
            caddies: lenient_list::<RawCaddie>(body.get("caddie_master"), "caddie_master")
                .into_iter()
                .map(CaddieRef::from)
                .collect(),
        }
    }
}

pub(crate) fn lenient_list<T: DeserializeOwned>(field: Option<&Value>, what: &str) -> Vec<T> {
    let Some(Value::Array(items)) = field else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| match T::deserialize(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(what, idx, error = %e, "skipping malformed entry");
                None
            }
        })
        .collect()
}
