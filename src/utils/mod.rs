use crate::domain::{Quality, Song};

/// `"<name> - <artists> [<quality label>].mp3"`
pub fn download_filename(song: &Song, quality: &Quality) -> String {
    format!(
        "{} - {} [{}].mp3",
        song.name,
        song.artist.joined(),
        quality.label()
    )
}

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Artist;

    fn song(artist: Artist) -> Song {
        Song {
            id: "1".to_string(),
            source: "netease".to_string(),
            name: "Title".to_string(),
            artist,
        }
    }

    #[test]
    fn test_filename_with_artist_list() {
        let song = song(Artist::Many(vec!["A".to_string(), "B".to_string()]));
        assert_eq!(
            download_filename(&song, &Quality::new("320")),
            "Title - A, B [High].mp3"
        );
    }

    #[test]
    fn test_filename_with_single_artist() {
        let song = song(Artist::from("Solo"));
        assert_eq!(
            download_filename(&song, &Quality::new("320")),
            "Title - Solo [High].mp3"
        );
    }

    #[test]
    fn test_filename_unknown_quality_uses_raw_value() {
        let song = song(Artist::from("Solo"));
        assert_eq!(
            download_filename(&song, &Quality::new("999")),
            "Title - Solo [999].mp3"
        );
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("AC/DC - T.N.T. [High].mp3"), "AC_DC - T.N.T. [High].mp3");
        assert_eq!(sanitize_filename("normal-name.mp3"), "normal-name.mp3");
    }
}
