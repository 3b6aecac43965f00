use std::fmt::Write as _;
use std::io;
use std::path::Path;

use crate::config::FontSettings;

use super::FragmentSet;

/// Build the intermediate stylesheet source.
///
/// Layout: the color import, the universal reset, then every fragment in
/// cascade order. The color path is not checked here; the compiler resolves
/// it. Output depends only on the arguments.
pub fn assemble(colors: &Path, font: &FontSettings, fragments: &FragmentSet) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "@import \"{}\";", colors.display());
    out.push('\n');
    push_reset(&mut out, font);

    for (_, text) in fragments.iter() {
        out.push('\n');
        out.push_str(text);
        if !text.is_empty() && !text.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}

/// Clears inherited properties everywhere, then restores the font on
/// everything but icons.
fn push_reset(out: &mut String, font: &FontSettings) {
    out.push_str("* {\n");
    out.push_str("  all: unset;\n");
    out.push_str("  &:not(icon) {\n");
    let _ = writeln!(out, "    font-family: \"{}\";", font.family);
    let _ = writeln!(out, "    font-size: {};", font.size);
    out.push_str("  }\n");
    out.push_str("}\n");
}

/// Overwrite the scratch file with `source`.
pub fn write_scratch(path: &Path, source: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FragmentSlot;

    fn font() -> FontSettings {
        FontSettings::default()
    }

    #[test]
    fn import_comes_first() {
        let doc = assemble(Path::new("/c.scss"), &font(), &FragmentSet::builtin());
        assert!(doc.starts_with("@import \"/c.scss\";\n"));
        assert_eq!(doc.matches("@import").count(), 1);
    }

    #[test]
    fn reset_restores_font_outside_icons() {
        let font = FontSettings {
            family: "Inter".into(),
            size: "12px".into(),
        };
        let doc = assemble(Path::new("/c.scss"), &font, &FragmentSet::empty());
        assert!(doc.contains("all: unset;"));
        assert!(doc.contains("&:not(icon)"));
        assert!(doc.contains("font-family: \"Inter\";"));
        assert!(doc.contains("font-size: 12px;"));
    }

    #[test]
    fn fragments_follow_reset_in_order() {
        let set = FragmentSet::empty()
            .with(FragmentSlot::Launcher, ".l{}")
            .with(FragmentSlot::Misc, ".m{}")
            .with(FragmentSlot::Notifications, ".n{}")
            .with(FragmentSlot::Bar, ".b{}")
            .with(FragmentSlot::Panel, ".p{}");
        let doc = assemble(Path::new("/c.scss"), &font(), &set);

        let reset = doc.find("all: unset").unwrap();
        let positions: Vec<usize> = [".m{}", ".b{}", ".p{}", ".n{}", ".l{}"]
            .iter()
            .map(|f| doc.find(f).unwrap())
            .collect();
        assert!(reset < positions[0]);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn write_scratch_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("style.scss");
        write_scratch(&path, "old content that is longer").unwrap();
        write_scratch(&path, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }
}
