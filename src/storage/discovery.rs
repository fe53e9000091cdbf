//! Locating dates, formats and stats files in the data lake.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDate;
use glob::Pattern;
use regex::Regex;
use tracing::debug;

use super::{StorageConfig, StorageError};

/// `<format>-<rating>.json`
static RE_STATS_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)-(\d+)\.json$").expect("Invalid regex"));

/// Generation prefix of a format id, e.g. `gen9ou`.
static RE_GENERATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^gen(\d+)").expect("Invalid regex"));

/// Format ids: lowercase alphanumeric words joined by dashes.
static RE_FORMAT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("Invalid regex"));

/// A stats file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsFile {
    pub format: String,
    /// `None` for files without a numeric rating suffix
    pub rating: Option<u32>,
    pub path: PathBuf,
}

impl StatsFile {
    /// Split a file name into format and rating.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_str()?;

        if let Some(caps) = RE_STATS_FILE.captures(name) {
            return Some(Self {
                format: caps[1].to_string(),
                rating: caps[2].parse().ok(),
                path,
            });
        }

        let format = name.strip_suffix(".json")?.to_string();
        Some(Self {
            format,
            rating: None,
            path,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Whether a directory name is a `YYYY-MM` month.
pub fn is_date_dir(name: &str) -> bool {
    name.len() == 7 && NaiveDate::parse_from_str(&format!("{}-01", name), "%Y-%m-%d").is_ok()
}

/// Newest `YYYY-MM` directory under the data dir.
pub fn latest_date(config: &StorageConfig) -> Result<String, StorageError> {
    if !config.data_dir.is_dir() {
        return Err(StorageError::NoDateDirectory(config.data_dir.clone()));
    }

    let mut dates: Vec<String> = fs::read_dir(&config.data_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| is_date_dir(name))
        .collect();

    dates.sort();
    dates
        .pop()
        .ok_or_else(|| StorageError::NoDateDirectory(config.data_dir.clone()))
}

fn glob_json(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>, StorageError> {
    let pattern = format!(
        "{}/{}*.json",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(prefix)
    );

    let mut paths: Vec<PathBuf> = glob::glob(&pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Reject format ids that could name anything other than a stats file.
pub fn validate_format(format: &str) -> Result<(), StorageError> {
    if RE_FORMAT_ID.is_match(format) {
        Ok(())
    } else {
        Err(StorageError::InvalidFormat(format.to_string()))
    }
}

/// Every `.json` stats file for a month, sorted by file name.
pub fn list_stats_files(config: &StorageConfig, date: &str) -> Result<Vec<StatsFile>, StorageError> {
    let dir = config.stats_dir(date);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    Ok(glob_json(&dir, "")?
        .into_iter()
        .filter_map(StatsFile::from_path)
        .collect())
}

/// Pick the stats file for a format.
///
/// Formats that already carry a suffix (`gen9ou-1825`) match their file
/// directly. Otherwise the highest numeric rating among `<format>-*.json`
/// wins, then a bare `<format>.json`.
pub fn best_stats_file(
    config: &StorageConfig,
    date: &str,
    format: &str,
) -> Result<StatsFile, StorageError> {
    validate_format(format)?;
    let dir = config.stats_dir(date);
    let not_found = || StorageError::NoStatsFile {
        format: format.to_string(),
        date: date.to_string(),
    };

    if !dir.is_dir() {
        return Err(not_found());
    }

    let exact = dir.join(format!("{}.json", format));
    if format.contains('-') && exact.is_file() {
        return Ok(StatsFile {
            format: format.to_string(),
            rating: None,
            path: exact,
        });
    }

    let candidates = glob_json(&dir, &format!("{}-", format))?;
    if candidates.is_empty() {
        if exact.is_file() {
            return Ok(StatsFile {
                format: format.to_string(),
                rating: None,
                path: exact,
            });
        }
        return Err(not_found());
    }

    let mut best: Option<(u32, &PathBuf)> = None;
    for path in &candidates {
        let rating = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.rsplit('-').next())
            .and_then(|suffix| suffix.parse::<u32>().ok());

        if let Some(rating) = rating {
            if best.map_or(true, |(top, _)| rating > top) {
                best = Some((rating, path));
            }
        }
    }

    let (rating, path) = match best {
        Some((rating, path)) => (Some(rating), path.clone()),
        None => (None, candidates[0].clone()),
    };

    debug!("Best stats file for {} in {}: {:?}", format, date, path);
    Ok(StatsFile {
        format: format.to_string(),
        rating,
        path,
    })
}

/// Stats file for an exact rating, or the best file when that rating is absent.
pub fn stats_file(
    config: &StorageConfig,
    date: &str,
    format: &str,
    rating: Option<u32>,
) -> Result<StatsFile, StorageError> {
    validate_format(format)?;
    if let Some(rating) = rating {
        let path = config
            .stats_dir(date)
            .join(format!("{}-{}.json", format, rating));
        if path.is_file() {
            return Ok(StatsFile {
                format: format.to_string(),
                rating: Some(rating),
                path,
            });
        }
        debug!("No {}-{} stats file, using best available", format, rating);
    }

    best_stats_file(config, date, format)
}

/// Generation number of a format id, 0 when it has none.
pub fn generation(format: &str) -> u32 {
    RE_GENERATION
        .captures(format)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Distinct formats with rated stats files, newest generation first.
pub fn list_formats(config: &StorageConfig, date: &str) -> Result<Vec<String>, StorageError> {
    let formats: BTreeSet<String> = list_stats_files(config, date)?
        .into_iter()
        .filter(|file| file.rating.is_some())
        .map(|file| file.format)
        .collect();

    let mut formats: Vec<String> = formats.into_iter().collect();
    formats.sort_by(|a, b| generation(b).cmp(&generation(a)).then_with(|| a.cmp(b)));
    Ok(formats)
}

/// Ratings available for a format, ascending.
pub fn list_ratings(
    config: &StorageConfig,
    date: &str,
    format: &str,
) -> Result<Vec<u32>, StorageError> {
    let ratings: BTreeSet<u32> = list_stats_files(config, date)?
        .into_iter()
        .filter(|file| file.format == format)
        .filter_map(|file| file.rating)
        .collect();

    Ok(ratings.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lake(files: &[&str]) -> (TempDir, StorageConfig) {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig::new(dir.path().to_path_buf());
        for file in files {
            let path = config.data_dir.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "{}").unwrap();
        }
        (dir, config)
    }

    #[test]
    fn test_is_date_dir() {
        assert!(is_date_dir("2025-10"));
        assert!(!is_date_dir("2025-13"));
        assert!(!is_date_dir("2025-1"));
        assert!(!is_date_dir("meta"));
    }

    #[test]
    fn test_latest_date() {
        let (_dir, config) = lake(&[
            "2025-09/data/gen9ou-0.json",
            "2025-10/data/gen9ou-0.json",
            "meta/pokedex.json",
        ]);
        fs::create_dir_all(config.data_dir.join("2099-99")).unwrap();

        assert_eq!(latest_date(&config).unwrap(), "2025-10");
    }

    #[test]
    fn test_latest_date_missing() {
        let (_dir, config) = lake(&["meta/pokedex.json"]);
        assert!(matches!(
            latest_date(&config),
            Err(StorageError::NoDateDirectory(_))
        ));

        let config = StorageConfig::new(PathBuf::from("/nonexistent/pokemeta"));
        assert!(latest_date(&config).is_err());
    }

    #[test]
    fn test_best_stats_file_highest_rating() {
        let (_dir, config) = lake(&[
            "2025-10/data/gen9ou-0.json",
            "2025-10/data/gen9ou-1825.json",
            "2025-10/data/gen9ou-1500.json",
            "2025-10/data/gen9uu-1760.json",
        ]);

        let best = best_stats_file(&config, "2025-10", "gen9ou").unwrap();
        assert_eq!(best.rating, Some(1825));
        assert_eq!(best.file_name(), "gen9ou-1825.json");
    }

    #[test]
    fn test_best_stats_file_exact_suffix() {
        let (_dir, config) = lake(&[
            "2025-10/data/gen9ou-1500.json",
            "2025-10/data/gen9ou-1825.json",
        ]);

        let best = best_stats_file(&config, "2025-10", "gen9ou-1500").unwrap();
        assert_eq!(best.file_name(), "gen9ou-1500.json");
    }

    #[test]
    fn test_best_stats_file_bare_fallback() {
        let (_dir, config) = lake(&["2025-10/data/gen9ou.json"]);

        let best = best_stats_file(&config, "2025-10", "gen9ou").unwrap();
        assert_eq!(best.file_name(), "gen9ou.json");
        assert_eq!(best.rating, None);
    }

    #[test]
    fn test_best_stats_file_unparseable_ratings() {
        let (_dir, config) = lake(&[
            "2025-10/data/gen9ou-beta.json",
            "2025-10/data/gen9ou-alpha.json",
        ]);

        let best = best_stats_file(&config, "2025-10", "gen9ou").unwrap();
        assert_eq!(best.file_name(), "gen9ou-alpha.json");
    }

    #[test]
    fn test_best_stats_file_missing() {
        let (_dir, config) = lake(&["2025-10/data/gen9uu-1760.json"]);

        assert!(matches!(
            best_stats_file(&config, "2025-10", "gen9ou"),
            Err(StorageError::NoStatsFile { .. })
        ));
        assert!(best_stats_file(&config, "2024-01", "gen9ou").is_err());
    }

    #[test]
    fn test_stats_file_exact_and_fallback() {
        let (_dir, config) = lake(&[
            "2025-10/data/gen9ou-1500.json",
            "2025-10/data/gen9ou-1825.json",
        ]);

        let exact = stats_file(&config, "2025-10", "gen9ou", Some(1500)).unwrap();
        assert_eq!(exact.rating, Some(1500));

        let fallback = stats_file(&config, "2025-10", "gen9ou", Some(1695)).unwrap();
        assert_eq!(fallback.rating, Some(1825));

        let best = stats_file(&config, "2025-10", "gen9ou", None).unwrap();
        assert_eq!(best.rating, Some(1825));
    }

    #[test]
    fn test_stats_file_rejects_path_like_format() {
        let (_dir, config) = lake(&["2025-10/data/gen9ou-1500.json", "secret.json"]);

        for format in ["../../secret", "gen9ou/../gen9ou", "Gen9OU", "", "gen9ou-"] {
            assert!(
                matches!(
                    stats_file(&config, "2025-10", format, None),
                    Err(StorageError::InvalidFormat(_))
                ),
                "accepted {:?}",
                format
            );
        }
        assert!(validate_format("gen9vgc2024regg").is_ok());
        assert!(validate_format("gen9ou-1500").is_ok());
    }

    #[test]
    fn test_list_formats_by_generation() {
        let (_dir, config) = lake(&[
            "2025-10/data/gen8ou-1500.json",
            "2025-10/data/gen9uu-0.json",
            "2025-10/data/gen9ou-0.json",
            "2025-10/data/gen9ou-1825.json",
            "2025-10/data/gen10ou-0.json",
            "2025-10/data/battlestadium-0.json",
            "2025-10/data/notes.json",
        ]);

        let formats = list_formats(&config, "2025-10").unwrap();
        assert_eq!(
            formats,
            vec!["gen10ou", "gen9ou", "gen9uu", "gen8ou", "battlestadium"]
        );
    }

    #[test]
    fn test_list_ratings() {
        let (_dir, config) = lake(&[
            "2025-10/data/gen9ou-1825.json",
            "2025-10/data/gen9ou-0.json",
            "2025-10/data/gen9ou-1500.json",
            "2025-10/data/gen9oumonotype-1500.json",
        ]);

        assert_eq!(
            list_ratings(&config, "2025-10", "gen9ou").unwrap(),
            vec![0, 1500, 1825]
        );
        assert!(list_ratings(&config, "2025-10", "gen1ou").unwrap().is_empty());
    }

    #[test]
    fn test_generation() {
        assert_eq!(generation("gen9ou"), 9);
        assert_eq!(generation("gen10ubers"), 10);
        assert_eq!(generation("battlestadium"), 0);
    }

    #[test]
    fn test_stats_file_from_path() {
        let file = StatsFile::from_path(PathBuf::from("/x/gen9doublesou-1760.json")).unwrap();
        assert_eq!(file.format, "gen9doublesou");
        assert_eq!(file.rating, Some(1760));

        let bare = StatsFile::from_path(PathBuf::from("/x/gen9ou.json")).unwrap();
        assert_eq!(bare.format, "gen9ou");
        assert_eq!(bare.rating, None);

        assert!(StatsFile::from_path(PathBuf::from("/x/readme.txt")).is_none());
    }
}
