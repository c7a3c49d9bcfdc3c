use serde::{Deserialize, Serialize};

/// One scheduled talk, or a holiday placeholder (speaker `"N/A"`).
///
/// `date` and `time` stay raw strings; nothing outside the `dates`
/// module should interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seminar {
    #[serde(rename = "seminar_title")]
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub speaker: String,
    pub affiliation: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl Seminar {
    pub fn is_holiday(&self) -> bool {
        self.speaker == "N/A"
    }
}

/// Entry inside a department/series group; the group supplies the
/// department and series fields the entry omits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEntry {
    #[serde(rename = "seminar_title")]
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub speaker: String,
    pub affiliation: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeminarGroup {
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    pub entries: Vec<GroupEntry>,
}

/// The dataset file is either a flat list of full records or a list of
/// department/series groups.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Dataset {
    Flat(Vec<Seminar>),
    Grouped(Vec<SeminarGroup>),
}

impl Dataset {
    pub fn into_seminars(self) -> Vec<Seminar> {
        match self {
            Dataset::Flat(seminars) => seminars,
            Dataset::Grouped(groups) => groups
                .into_iter()
                .flat_map(|group| {
                    let department = group.department;
                    let series = group.series;
                    group.entries.into_iter().map(move |entry| Seminar {
                        title: entry.title,
                        date: entry.date,
                        time: entry.time,
                        location: entry.location,
                        speaker: entry.speaker,
                        affiliation: entry.affiliation,
                        department: department.clone(),
                        series: series.clone(),
                        abstract_text: entry.abstract_text,
                        bio: entry.bio,
                    })
                })
                .collect(),
        }
    }
}

pub fn load_dataset(json: &str) -> Result<Vec<Seminar>, serde_json::Error> {
    serde_json::from_str::<Dataset>(json).map(Dataset::into_seminars)
}
