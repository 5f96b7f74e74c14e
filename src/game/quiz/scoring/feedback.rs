use serde::Deserialize;
use std::convert::TryFrom;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FeedbackTier {
    /// Exclusive upper bound on the score for this message.
    pub below: u32,
    pub message: String,
}

#[derive(Deserialize)]
struct RawFeedbackTiers {
    #[serde(default)]
    tiers: Vec<FeedbackTier>,
    otherwise: String,
}

/// Step function from final score to a feedback message.
///
/// Messages may contain `{score}` and `{total}`, where `{total}` is the number of questions.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawFeedbackTiers")]
pub struct FeedbackTiers {
    tiers: Vec<FeedbackTier>,
    otherwise: String,
}

impl FeedbackTiers {
    pub fn new(tiers: Vec<FeedbackTier>, otherwise: String) -> Result<Self, String> {
        let ascending = tiers.windows(2).all(|pair| pair[0].below < pair[1].below);
        if !ascending {
            return Err("feedback tiers must have strictly ascending bounds".into());
        }
        Ok(FeedbackTiers { tiers, otherwise })
    }

    pub fn message_for(&self, score: u32, total: usize) -> String {
        let template = self
            .tiers
            .iter()
            .find(|tier| score < tier.below)
            .map_or(&self.otherwise, |tier| &tier.message);
        template
            .replace("{score}", &score.to_string())
            .replace("{total}", &total.to_string())
    }

    pub(super) fn from_static(tiers: &[(u32, &str)], otherwise: &str) -> Self {
        FeedbackTiers {
            tiers: tiers
                .iter()
                .map(|(below, message)| FeedbackTier {
                    below: *below,
                    message: (*message).to_owned(),
                })
                .collect(),
            otherwise: otherwise.to_owned(),
        }
    }
}

impl TryFrom<RawFeedbackTiers> for FeedbackTiers {
    type Error = String;

    fn try_from(raw: RawFeedbackTiers) -> Result<Self, Self::Error> {
        FeedbackTiers::new(raw.tiers, raw.otherwise)
    }
}
