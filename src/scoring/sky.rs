use crate::types::observation::{Sky, SkyCategory};
use crate::types::report::Score;

pub const UNRECOGNIZED_SUBCATEGORY_SCORE: Score = 5.0;

/// Categorical lookup on the sky condition. Substring matches are
/// case-sensitive and checked in order; the first hit wins.
pub fn sky_score(sky: &Sky) -> Score {
    let sub = sky.sub_category.as_str();
    match &sky.parent_category {
        SkyCategory::Clear => 3.0,
        SkyCategory::Clouds => {
            if sub.contains("light") || sub.contains("broken") || sub.contains("few") {
                1.0
            } else if sub.contains("overcast") {
                0.0
            } else {
                tracing::warn!(
                    subcategory = sub,
                    "unrecognized cloud subcategory; using default of 5"
                );
                UNRECOGNIZED_SUBCATEGORY_SCORE
            }
        }
        SkyCategory::Rain | SkyCategory::Snow => {
            if sub.contains("light") {
                6.0
            } else if sub.contains("moderate") {
                8.0
            } else if sub.contains("heavy") {
                10.0
            } else {
                tracing::warn!(
                    category = sky.parent_category.as_str(),
                    subcategory = sub,
                    "unrecognized precipitation subcategory; using default of 5"
                );
                UNRECOGNIZED_SUBCATEGORY_SCORE
            }
        }
        SkyCategory::Other(name) => {
            tracing::warn!(
                category = name.as_str(),
                "unrecognized sky category; ignoring sky in score"
            );
            0.0
        }
    }
}
