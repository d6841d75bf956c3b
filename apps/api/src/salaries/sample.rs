//! Synthetic salary submissions used to bootstrap an empty database.
//!
//! Salaries start from a per-industry role median and are scaled by
//! experience, location, company size, education, noise and the documented
//! demographic gaps, then rounded to the nearest thousand.

use anyhow::Context;
use chrono::{Duration, Utc};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use sqlx::PgPool;
use tracing::info;

use crate::config::SampleSettings;
use crate::errors::AppError;
use crate::models::submission::NewSubmission;
use crate::salaries::submission::insert_many;

type Roles = &'static [(&'static str, f64)];

const INDUSTRY_ROLES: &[(&str, Roles)] = &[
    (
        "Technology",
        &[
            ("Software Engineer", 105_000.0),
            ("Senior Software Engineer", 145_000.0),
            ("Data Analyst", 75_000.0),
            ("Data Scientist", 115_000.0),
            ("Product Manager", 125_000.0),
            ("UX Designer", 95_000.0),
            ("DevOps Engineer", 115_000.0),
            ("Engineering Manager", 165_000.0),
            ("Project Manager", 95_000.0),
        ],
    ),
    (
        "Finance",
        &[
            ("Financial Analyst", 85_000.0),
            ("Senior Financial Analyst", 115_000.0),
            ("Data Analyst", 80_000.0),
            ("Software Engineer", 110_000.0),
            ("Project Manager", 100_000.0),
            ("Risk Analyst", 90_000.0),
            ("Investment Analyst", 95_000.0),
            ("Compliance Officer", 85_000.0),
        ],
    ),
    (
        "Healthcare",
        &[
            ("Data Analyst", 65_000.0),
            ("Project Manager", 75_000.0),
            ("HR Manager", 70_000.0),
            ("Healthcare Administrator", 80_000.0),
            ("Clinical Data Analyst", 72_000.0),
            ("Marketing Manager", 75_000.0),
            ("IT Specialist", 70_000.0),
            ("Financial Analyst", 72_000.0),
        ],
    ),
    (
        "Consulting",
        &[
            ("Consultant", 85_000.0),
            ("Senior Consultant", 115_000.0),
            ("Data Analyst", 80_000.0),
            ("Project Manager", 95_000.0),
            ("Business Analyst", 82_000.0),
            ("Strategy Analyst", 90_000.0),
            ("Management Consultant", 105_000.0),
        ],
    ),
    (
        "E-commerce",
        &[
            ("Software Engineer", 100_000.0),
            ("Product Manager", 115_000.0),
            ("Data Analyst", 72_000.0),
            ("UX Designer", 88_000.0),
            ("Marketing Manager", 85_000.0),
            ("Operations Manager", 78_000.0),
            ("Supply Chain Analyst", 68_000.0),
        ],
    ),
    (
        "Education",
        &[
            ("Teacher", 52_000.0),
            ("Administrator", 65_000.0),
            ("Data Analyst", 55_000.0),
            ("IT Specialist", 58_000.0),
            ("HR Manager", 60_000.0),
            ("Financial Analyst", 58_000.0),
            ("Program Coordinator", 50_000.0),
            ("Research Analyst", 55_000.0),
        ],
    ),
    (
        "Retail",
        &[
            ("Store Manager", 55_000.0),
            ("District Manager", 75_000.0),
            ("Marketing Manager", 68_000.0),
            ("Data Analyst", 58_000.0),
            ("HR Manager", 62_000.0),
            ("Supply Chain Analyst", 60_000.0),
            ("Buyer", 58_000.0),
            ("Operations Manager", 65_000.0),
        ],
    ),
    (
        "Manufacturing",
        &[
            ("Operations Manager", 85_000.0),
            ("Quality Engineer", 75_000.0),
            ("Supply Chain Manager", 90_000.0),
            ("Project Manager", 82_000.0),
            ("Data Analyst", 65_000.0),
            ("HR Manager", 70_000.0),
            ("Financial Analyst", 72_000.0),
            ("Production Manager", 78_000.0),
        ],
    ),
    (
        "Marketing",
        &[
            ("Marketing Manager", 82_000.0),
            ("Digital Marketing Specialist", 62_000.0),
            ("Content Strategist", 65_000.0),
            ("Brand Manager", 85_000.0),
            ("Data Analyst", 68_000.0),
            ("Marketing Analyst", 65_000.0),
            ("Creative Director", 105_000.0),
            ("Social Media Manager", 55_000.0),
        ],
    ),
    (
        "Nonprofit",
        &[
            ("Program Manager", 58_000.0),
            ("Development Director", 72_000.0),
            ("Data Analyst", 52_000.0),
            ("HR Manager", 55_000.0),
            ("Marketing Manager", 55_000.0),
            ("Grant Writer", 52_000.0),
            ("Operations Manager", 60_000.0),
            ("Finance Manager", 62_000.0),
        ],
    ),
];

/// Cost-of-living multipliers.
const LOCATIONS: &[(&str, f64)] = &[
    ("San Francisco, CA", 1.35),
    ("New York, NY", 1.30),
    ("Seattle, WA", 1.22),
    ("Boston, MA", 1.18),
    ("Los Angeles, CA", 1.15),
    ("Austin, TX", 1.05),
    ("Denver, CO", 1.03),
    ("Chicago, IL", 1.0),
    ("Atlanta, GA", 0.95),
    ("Dallas, TX", 0.95),
    ("Phoenix, AZ", 0.92),
    ("Remote", 1.0),
];

/// (value, weight, pay multiplier)
type Weighted = (&'static str, f64, f64);

const COMPANY_SIZES: &[Weighted] = &[
    ("startup", 0.15, 0.92),
    ("small", 0.20, 0.96),
    ("medium", 0.25, 1.0),
    ("large", 0.25, 1.05),
    ("enterprise", 0.15, 1.10),
];

const EDUCATION_LEVELS: &[Weighted] = &[
    ("High School", 0.08, 0.92),
    ("Associate", 0.10, 0.96),
    ("Bachelor", 0.50, 1.0),
    ("Master", 0.27, 1.05),
    ("PhD", 0.05, 1.08),
];

const GENDERS: &[Weighted] = &[
    ("Female", 0.40, 0.87),
    ("Male", 0.52, 1.0),
    ("Non-binary", 0.08, 0.91),
];

/// Uniformly drawn; the second field is the pay multiplier.
const ETHNICITIES: &[(&str, f64)] = &[
    ("Asian", 1.0),
    ("Black/African American", 0.93),
    ("Hispanic/Latino", 0.90),
    ("White", 1.0),
    ("Mixed/Multiple", 0.96),
];

const REMOTE_STATUSES: &[&str] = &["remote", "hybrid", "onsite"];

const MAX_SAMPLE_EXPERIENCE: i32 = 15;
const VARIANCE: f64 = 0.08;

/// Diminishing-returns experience curve.
pub fn experience_multiplier(years: i32) -> f64 {
    let years = f64::from(years.max(0));
    if years <= 2.0 {
        0.85 + years * 0.075
    } else if years <= 6.0 {
        1.0 + (years - 2.0) * 0.05
    } else if years <= 12.0 {
        1.20 + (years - 6.0) * 0.035
    } else {
        1.40 + (years - 12.0) * 0.05
    }
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

fn pick_weighted(rng: &mut StdRng, items: &'static [Weighted]) -> anyhow::Result<&'static Weighted> {
    items
        .choose_weighted(rng, |item| item.1)
        .context("invalid sample weight table")
}

/// Generates `count` submissions from `rng`. Same seed, same output.
pub fn generate_samples(rng: &mut StdRng, count: usize) -> anyhow::Result<Vec<NewSubmission>> {
    let now = Utc::now();
    let mut samples = Vec::with_capacity(count);

    for _ in 0..count {
        let (industry, roles) = pick(rng, INDUSTRY_ROLES);
        let (title, role_median) = pick(rng, *roles);
        let (location, location_multiplier) = pick(rng, LOCATIONS);
        let years = rng.gen_range(0..=MAX_SAMPLE_EXPERIENCE);

        let (size, _, size_multiplier) = pick_weighted(rng, COMPANY_SIZES)?;
        let (education, _, education_multiplier) = pick_weighted(rng, EDUCATION_LEVELS)?;
        let noise = rng.gen_range(1.0 - VARIANCE..=1.0 + VARIANCE);
        let (gender, _, gender_multiplier) = pick_weighted(rng, GENDERS)?;
        let (ethnicity, ethnicity_multiplier) = pick(rng, ETHNICITIES);

        let base = role_median
            * experience_multiplier(years)
            * location_multiplier
            * size_multiplier
            * education_multiplier
            * noise
            * gender_multiplier
            * ethnicity_multiplier;

        let remote = pick(rng, REMOTE_STATUSES);
        let days_ago = rng.gen_range(1..=365);

        samples.push(NewSubmission {
            job_title: title.to_string(),
            industry: industry.to_string(),
            years_experience: years,
            salary: (base / 1000.0).round() * 1000.0,
            location: location.to_string(),
            gender: Some(gender.to_string()),
            ethnicity: Some(ethnicity.to_string()),
            education_level: Some(education.to_string()),
            company_size: Some(size.to_string()),
            company_name: None,
            remote_status: Some(remote.to_string()),
            created_at: Some(now - Duration::days(days_ago)),
        });
    }

    Ok(samples)
}

pub fn sample_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generates and inserts `settings.records` submissions. Returns the count inserted.
pub async fn seed_sample_data(pool: &PgPool, settings: &SampleSettings) -> Result<usize, AppError> {
    let mut rng = sample_rng(settings.rng_seed);
    let samples = generate_samples(&mut rng, settings.records)?;
    info!(
        records = samples.len(),
        seeded = settings.rng_seed.is_some(),
        "Generating sample salary data"
    );
    Ok(insert_many(pool, &samples).await?)
}
