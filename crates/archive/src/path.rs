use skowt_protocol::AssetRef;

/// Characters that collide with path delimiters or are rejected by common filesystems.
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Makes a free-text value safe to use as a single archive path segment.
///
/// Reserved and control characters become `_`; surrounding whitespace and
/// trailing dots are trimmed. A segment that would be empty or a
/// relative-directory marker (`.`, `..`) becomes `_`.
pub fn sanitize_segment(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| {
            if RESERVED.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim().trim_end_matches(['.', ' ']);
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return "_".into();
    }
    trimmed.to_string()
}

/// Keeps only ASCII alphanumerics of a file extension.
pub fn sanitize_extension(raw: &str) -> String {
    raw.trim_start_matches('.')
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Archive path of an asset: `<game>/<category>/<name>.<ext>`.
pub fn entry_path(asset: &AssetRef) -> String {
    let folder = folder_path(asset);
    let file = file_name(&sanitize_segment(&asset.name), &sanitize_extension(&asset.extension));
    format!("{folder}/{file}")
}

/// `path` with a ` (n)` copy marker before its extension.
///
/// `path` must be an [`entry_path`] whose sanitized extension is `ext`.
pub(crate) fn numbered_path(path: &str, ext: &str, n: usize) -> String {
    let stem = if ext.is_empty() {
        path
    } else {
        path.strip_suffix(ext)
            .and_then(|p| p.strip_suffix('.'))
            .unwrap_or(path)
    };
    file_name(&format!("{stem} ({n})"), ext)
}

fn folder_path(asset: &AssetRef) -> String {
    format!(
        "{}/{}",
        sanitize_segment(&asset.game_slug),
        sanitize_segment(&asset.category_name)
    )
}

fn file_name(stem: &str, ext: &str) -> String {
    if ext.is_empty() {
        stem.to_string()
    } else {
        format!("{stem}.{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, ext: &str, game: &str, category: &str) -> AssetRef {
        AssetRef {
            id: "a1".into(),
            name: name.into(),
            extension: ext.into(),
            game_slug: game.into(),
            category_name: category.into(),
            size: 0,
        }
    }

    #[test]
    fn plain_layout() {
        let path = entry_path(&asset("Furina", "png", "genshin", "characters"));
        assert_eq!(path, "genshin/characters/Furina.png");
    }

    #[test]
    fn category_with_slash_stays_one_segment() {
        let path = entry_path(&asset("Logo", "png", "hsr", "UI/Icons"));
        assert_eq!(path, "hsr/UI_Icons/Logo.png");
        assert_eq!(path.matches('/').count(), 2);
    }

    #[test]
    fn reserved_characters_replaced() {
        assert_eq!(sanitize_segment(r#"a:b*c?d"e<f>g|h\i"#), "a_b_c_d_e_f_g_h_i");
    }

    #[test]
    fn control_characters_replaced() {
        assert_eq!(sanitize_segment("tab\there\nnew"), "tab_here_new");
    }

    #[test]
    fn dot_segments_neutralized() {
        assert_eq!(sanitize_segment(".."), "_");
        assert_eq!(sanitize_segment("."), "_");
        assert_eq!(sanitize_segment("   "), "_");
        assert_eq!(sanitize_segment(""), "_");
    }

    #[test]
    fn traversal_cannot_escape_folder() {
        let path = entry_path(&asset("../../etc/passwd", "png", "..", "../x"));
        assert!(!path.split('/').any(|seg| seg == ".." || seg == "."));
        assert_eq!(path.matches('/').count(), 2);
    }

    #[test]
    fn trailing_dots_and_spaces_trimmed() {
        assert_eq!(sanitize_segment(" Splash Art. "), "Splash Art");
        assert_eq!(sanitize_segment("name..."), "name");
    }

    #[test]
    fn unicode_preserved() {
        assert_eq!(sanitize_segment("キャラクター"), "キャラクター");
    }

    #[test]
    fn extension_sanitized() {
        assert_eq!(sanitize_extension(".png"), "png");
        assert_eq!(sanitize_extension("we/bp"), "webp");
        assert_eq!(sanitize_extension(""), "");
    }

    #[test]
    fn numbered_path_marks_before_extension() {
        let path = entry_path(&asset("Icon", "png", "genshin", "ui"));
        assert_eq!(numbered_path(&path, "png", 2), "genshin/ui/Icon (2).png");

        let bare = entry_path(&asset("raw", "", "genshin", "misc"));
        assert_eq!(numbered_path(&bare, "", 3), "genshin/misc/raw (3)");
    }

    #[test]
    fn empty_extension_omits_dot() {
        let path = entry_path(&asset("raw", "", "genshin", "misc"));
        assert_eq!(path, "genshin/misc/raw");
    }
}
