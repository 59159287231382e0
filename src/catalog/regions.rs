//! Louis Vuitton storefront regions, their API locales and base domains.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const GLOBAL_API: &str = "https://api.louisvuitton.com";
const CHINA_API: &str = "https://api.louisvuitton.cn";

/// Supported storefront regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Uk,
    Au,
    Us,
    Hk,
    Fr,
    Kr,
    Jp,
    Tw,
    Cn,
}

impl Region {
    /// Returns the uppercase region code.
    pub fn code(&self) -> &'static str {
        match self {
            Region::Uk => "UK",
            Region::Au => "AU",
            Region::Us => "US",
            Region::Hk => "HK",
            Region::Fr => "FR",
            Region::Kr => "KR",
            Region::Jp => "JP",
            Region::Tw => "TW",
            Region::Cn => "CN",
        }
    }

    /// Returns the locale segment used in API paths.
    pub fn locale_id(&self) -> &'static str {
        match self {
            Region::Uk => "eng-gb",
            Region::Au => "eng-au",
            Region::Us => "eng-us",
            Region::Hk => "eng-hk",
            Region::Fr => "fra-fr",
            Region::Kr => "kor-kr",
            Region::Jp => "jpn-jp",
            Region::Tw => "zht-tw",
            Region::Cn => "zhs-cn",
        }
    }

    /// Returns the API base domain. Mainland China is served from its own domain.
    pub fn api_base_domain(&self) -> &'static str {
        match self {
            Region::Cn => CHINA_API,
            _ => GLOBAL_API,
        }
    }

    /// Returns the Accept-Language header value for this region.
    pub fn accept_language(&self) -> &'static str {
        match self {
            Region::Uk => "en-GB,en;q=0.9",
            Region::Au => "en-AU,en;q=0.9",
            Region::Us => "en-US,en;q=0.9",
            Region::Hk => "en-HK,en;q=0.9,zh-HK;q=0.8",
            Region::Fr => "fr-FR,fr;q=0.9,en;q=0.8",
            Region::Kr => "ko-KR,ko;q=0.9,en;q=0.8",
            Region::Jp => "ja-JP,ja;q=0.9,en;q=0.8",
            Region::Tw => "zh-TW,zh;q=0.9,en;q=0.8",
            Region::Cn => "zh-CN,zh;q=0.9,en;q=0.8",
        }
    }

    /// Returns the registry entry for this region.
    pub fn entry(&self) -> RegionEntry {
        RegionEntry {
            code: self.code().to_string(),
            locale_id: self.locale_id().to_string(),
            api_base_domain: self.api_base_domain().to_string(),
        }
    }

    /// Returns all supported regions.
    pub fn all() -> &'static [Region] {
        &[
            Region::Uk,
            Region::Au,
            Region::Us,
            Region::Hk,
            Region::Fr,
            Region::Kr,
            Region::Jp,
            Region::Tw,
            Region::Cn,
        ]
    }

    fn valid_codes() -> String {
        Region::all().iter().map(Region::code).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Region::all().iter().copied().find(|r| r.code() == code).ok_or_else(|| {
            ConfigError::InvalidRegion { code: s.trim().to_string(), valid: Region::valid_codes() }
        })
    }
}

/// Resolved storefront, as recorded in the run result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionEntry {
    pub code: String,
    pub locale_id: String,
    pub api_base_domain: String,
}

/// Resolves user-supplied region codes, preserving their order.
///
/// Fails on the first unknown code, so nothing is fetched for a partially valid list.
pub fn resolve<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Region>, ConfigError> {
    if codes.is_empty() {
        return Err(ConfigError::EmptyRegions);
    }
    codes.iter().map(|c| c.as_ref().parse()).collect()
}
