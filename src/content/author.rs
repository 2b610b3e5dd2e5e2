//! Author profiles

use serde::{Deserialize, Serialize};

/// Social handles of an author (or of a post's front-matter)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

/// An author profile loaded from `<slug>.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    /// File stem of the profile; never read from the JSON body
    #[serde(skip_deserializing)]
    pub slug: String,
    pub name: String,
    pub bio: String,
    pub social: Social,
    pub avatar: Option<String>,
}

impl Author {
    /// Fill in derived fields after the JSON body has been read
    pub(crate) fn finish(mut self, slug: String) -> Self {
        self.slug = slug;
        if self.avatar.is_none() {
            if let Some(github) = self.social.github.as_deref().filter(|g| !g.is_empty()) {
                self.avatar = Some(format!("https://github.com/{}.png", github));
            }
        }
        self
    }

    /// External profile links as (label, url) pairs
    pub fn social_links(&self) -> Vec<(&'static str, String)> {
        let social = &self.social;
        let mut links = Vec::new();

        if let Some(github) = &social.github {
            links.push(("GitHub", format!("https://github.com/{}", github)));
        }
        if let Some(twitter) = &social.twitter {
            links.push(("Twitter", format!("https://twitter.com/{}", twitter)));
        }
        if let Some(linkedin) = &social.linkedin {
            links.push((
                "LinkedIn",
                format!("https://www.linkedin.com/in/{}", linkedin),
            ));
        }
        if let Some(website) = &social.website {
            links.push(("Website", website.clone()));
        }

        links
    }
}
