//! Built-in synchronization jobs and the job catalog.
//!
//! The built-in jobs are the single source of truth for the seed images the
//! project ships; configured jobs with the same name replace them.

use std::collections::BTreeMap;

use seed_blocks::{BlockPattern, RowKey};

use crate::job::{ProviderKind, RegistrySource, SyncJob, SyntheticFallback};
use crate::registry::CanonicalRegistry;
use crate::{Error, Result};

pub const ATTRACTION_IMAGES: &str = "attraction-images";
pub const DESTINATION_IMAGES: &str = "destination-images";
pub const HOTEL_IMAGES: &str = "hotel-images";

const ATTRACTION_TITLES: [(RowKey, &str); 40] = [
    (1, "Eiffel_Tower"),
    (2, "Louvre"),
    (3, "Sensō-ji"),
    (4, "Tokyo_Skytree"),
    (5, "Central_Park"),
    (6, "Statue_of_Liberty"),
    (7, "British_Museum"),
    (8, "Tower_of_London"),
    (9, "Gateway_of_India"),
    (10, "Elephanta_Caves"),
    (11, "Marine_Drive,_Mumbai"),
    (12, "Red_Fort"),
    (13, "India_Gate"),
    (14, "Qutb_Minar"),
    (15, "Basilica_of_Bom_Jesus"),
    (16, "Dudhsagar_Falls"),
    (17, "Baga,_Goa"),
    (18, "Kerala_backwaters"),
    (19, "Munnar"),
    (20, "Chinese_fishing_nets"),
    (21, "Hawa_Mahal"),
    (22, "City_Palace,_Jaipur"),
    (23, "Amber_Fort"),
    (24, "Dal_Lake"),
    (25, "Shalimar_Bagh,_Srinagar"),
    (26, "Gulmarg"),
    (27, "Leh_Palace"),
    (28, "Pangong_Tso"),
    (29, "Nubra_Valley"),
    (30, "Shimla"),
    (31, "Rohtang_Pass"),
    (32, "Faisal_Mosque"),
    (33, "Badshahi_Mosque"),
    (34, "Clifton,_Karachi"),
    (35, "Temple_of_the_Tooth"),
    (36, "Galle_Fort"),
    (37, "Horton_Plains_National_Park"),
    (38, "Phewa_Lake"),
    (39, "Sheikh_Zayed_Grand_Mosque"),
    (40, "Louvre_Abu_Dhabi"),
];

const DESTINATION_TITLES: [(RowKey, &str); 45] = [
    (1, "Paris"),
    (2, "Tokyo"),
    (3, "New_York_City"),
    (4, "London"),
    (5, "Barcelona"),
    (6, "Rome"),
    (7, "Sydney"),
    (8, "Istanbul"),
    (9, "Bangkok"),
    (10, "Singapore"),
    (11, "Dubai"),
    (12, "Kuala_Lumpur"),
    (13, "Colombo"),
    (14, "Kathmandu"),
    (15, "Ho_Chi_Minh_City"),
    (16, "Bali"),
    (17, "Maldives"),
    (18, "Seoul"),
    (19, "Bhutan"),
    (20, "Doha"),
    (21, "Mumbai"),
    (22, "Delhi"),
    (23, "Goa"),
    (24, "Kerala"),
    (25, "Rajasthan"),
    (26, "Kashmir"),
    (27, "Ladakh"),
    (28, "Himachal_Pradesh"),
    (29, "Tamil_Nadu"),
    (30, "Karnataka"),
    (31, "Uttarakhand"),
    (32, "Andhra_Pradesh"),
    (33, "West_Bengal"),
    (34, "Gujarat"),
    (35, "Islamabad"),
    (36, "Lahore"),
    (37, "Karachi"),
    (38, "Kandy"),
    (39, "Galle"),
    (40, "Nuwara_Eliya"),
    (41, "Pokhara"),
    (42, "Chitwan_National_Park"),
    (43, "Abu_Dhabi"),
    (44, "Sharjah"),
    (45, "Muscat"),
];

/// Summary lookups for Kashmir return an unrelated map image.
const DESTINATION_OVERRIDES: [(RowKey, &str); 1] = [(
    26,
    "https://en.wikipedia.org/wiki/Special:FilePath/Pahalgam_Valley.jpg",
)];

/// Returns all built-in jobs.
pub fn builtin_jobs() -> Vec<SyncJob> {
    vec![
        SyncJob {
            name: ATTRACTION_IMAGES.into(),
            description: "attraction_images rows from Wikipedia page images".into(),
            provider: ProviderKind::Wikipedia,
            target: BlockPattern::insert("attraction_images", ["attraction_id", "image_url"]),
            anchor: None,
            label_source: None,
            registry: RegistrySource::Static(CanonicalRegistry::from_titles(ATTRACTION_TITLES)),
            overrides: BTreeMap::new(),
            fallback: SyntheticFallback::wikipedia_page(),
        },
        SyncJob {
            name: DESTINATION_IMAGES.into(),
            description: "destinations.image_url updates from Wikipedia page images".into(),
            provider: ProviderKind::Wikipedia,
            target: BlockPattern::update(
                "destinations",
                "image_url",
                "-- Destination image updates (Wikipedia)",
                "-- End destination image updates",
            ),
            anchor: Some(BlockPattern::insert_any("destinations")),
            label_source: Some(BlockPattern::insert_any("destinations")),
            registry: RegistrySource::Static(CanonicalRegistry::from_titles(DESTINATION_TITLES)),
            overrides: DESTINATION_OVERRIDES
                .iter()
                .map(|(key, url)| (*key, (*url).to_string()))
                .collect(),
            fallback: SyntheticFallback::wikipedia_page(),
        },
        SyncJob {
            name: HOTEL_IMAGES.into(),
            description: "hotel_images rows from Unsplash photo search".into(),
            provider: ProviderKind::Unsplash,
            target: BlockPattern::insert("hotel_images", ["hotel_id", "image_url"]),
            anchor: None,
            label_source: Some(BlockPattern::insert_any("hotels")),
            registry: RegistrySource::TargetKeys {
                title_template: "{label} hotel exterior".into(),
            },
            overrides: BTreeMap::new(),
            fallback: SyntheticFallback::new("https://unsplash.com/s/photos/{slug}"),
        },
    ]
}

/// Named jobs available to a run: the built-ins plus configured jobs.
#[derive(Debug, Clone)]
pub struct JobCatalog {
    jobs: Vec<SyncJob>,
}

impl Default for JobCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl JobCatalog {
    pub fn builtin() -> Self {
        Self {
            jobs: builtin_jobs(),
        }
    }

    /// Adds jobs, replacing any existing job with the same name.
    pub fn with_jobs(mut self, jobs: impl IntoIterator<Item = SyncJob>) -> Self {
        for job in jobs {
            match self.jobs.iter_mut().find(|j| j.name == job.name) {
                Some(existing) => {
                    tracing::debug!(job = %job.name, "Configured job replaces built-in");
                    *existing = job;
                }
                None => self.jobs.push(job),
            }
        }
        self
    }

    /// Looks a job up by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownJob`] when no job has this name.
    pub fn get(&self, name: &str) -> Result<&SyncJob> {
        self.jobs
            .iter()
            .find(|job| job.name == name)
            .ok_or_else(|| Error::UnknownJob {
                name: name.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyncJob> {
        self.jobs.iter()
    }
}
