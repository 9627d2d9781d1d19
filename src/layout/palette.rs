/// Qualitative 12-colour "Set3" palette.
pub const SET3: [&str; 12] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

pub const MILESTONE_GREY: &str = "#808080";

/// Sample `n` colours at evenly spaced points of [0, 1] across the palette.
pub fn sample_set3(n: usize) -> Vec<&'static str> {
    let len = SET3.len();
    (0..n)
        .map(|i| {
            if n <= 1 {
                return SET3[0];
            }
            let t = i as f64 / (n - 1) as f64;
            let idx = ((t * len as f64).floor() as usize).min(len - 1);
            SET3[idx]
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkPackagePalette {
    entries: Vec<(String, String)>,
}

impl WorkPackagePalette {
    pub fn from_work_packages<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = names.into_iter().collect();
        let colors = sample_set3(names.len());
        let entries = names
            .into_iter()
            .zip(colors)
            .map(|(name, color)| (name.to_string(), color.to_string()))
            .collect();
        Self { entries }
    }

    pub fn color_of(&self, work_package: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == work_package)
            .map(|(_, color)| color.as_str())
    }

    /// 以簡寫識別碼 (例如 "WP2") 找出工作包顏色
    ///
    /// Exact match on the id before `": "` wins; otherwise the first work
    /// package whose full name contains the identifier.
    pub fn resolve(&self, identifier: &str) -> Option<&str> {
        if identifier.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(name, _)| work_package_id(name) == identifier)
            .or_else(|| self.entries.iter().find(|(name, _)| name.contains(identifier)))
            .map(|(_, color)| color.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

fn work_package_id(name: &str) -> &str {
    name.split_once(": ").map(|(id, _)| id).unwrap_or(name).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_work_package_takes_first_colour() {
        assert_eq!(sample_set3(1), vec!["#8dd3c7"]);
        assert!(sample_set3(0).is_empty());
    }

    #[test]
    fn test_sampling_spans_whole_palette() {
        let colors = sample_set3(6);
        // t = 0, .2, .4, .6, .8, 1.0 -> idx 0, 2, 4, 7, 9, 11
        assert_eq!(
            colors,
            vec!["#8dd3c7", "#bebada", "#80b1d3", "#fccde5", "#bc80bd", "#ffed6f"]
        );
    }

    #[test]
    fn test_resolve_prefers_exact_id_over_substring() {
        let palette =
            WorkPackagePalette::from_work_packages(["WP10: Extras", "WP1: Design", "WP2: Build"]);
        assert_eq!(palette.resolve("WP1"), palette.color_of("WP1: Design"));
        assert_eq!(palette.resolve("Build"), palette.color_of("WP2: Build"));
        assert_eq!(palette.resolve("WP9"), None);
    }
}
