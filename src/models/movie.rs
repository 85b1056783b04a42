//! Catalog movie model.

/// One movie from the popular-movies catalog.
///
/// Immutable once loaded; the rating has already been parsed from the
/// catalog's string representation.
#[derive(Debug, Clone)]
pub struct Movie {
    /// Catalog identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Numeric rating. 0.0 when the catalog value could not be parsed.
    pub rating: f64,
    /// Full-size poster URL.
    pub poster_url: String,
}

impl Movie {
    /// Parse a rating from the catalog's locale-formatted string.
    ///
    /// The catalog delivers ratings like `"9.2"` or, in some locales,
    /// `"9,2"`. Anything unparseable maps to 0.0 rather than failing the
    /// whole catalog.
    pub fn parse_rating(raw: &str) -> f64 {
        raw.trim().replace(',', ".").parse().unwrap_or(0.0)
    }

    /// Poster URL rewritten to the catalog's 600px-wide variant.
    ///
    /// Catalog poster paths embed resize directives after a `._V` marker;
    /// URLs without the marker are returned unchanged.
    pub fn resized_poster_url(&self) -> String {
        match self.poster_url.find("._V") {
            Some(pos) => format!("{}._V0_UX600_.jpg", &self.poster_url[..pos]),
            None => self.poster_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating_dot() {
        assert_eq!(Movie::parse_rating("9.2"), 9.2);
    }

    #[test]
    fn test_parse_rating_comma_locale() {
        assert_eq!(Movie::parse_rating("8,1"), 8.1);
        assert_eq!(Movie::parse_rating(" 7,0 "), 7.0);
    }

    #[test]
    fn test_parse_rating_garbage_defaults_to_zero() {
        assert_eq!(Movie::parse_rating(""), 0.0);
        assert_eq!(Movie::parse_rating("N/A"), 0.0);
    }

    #[test]
    fn test_resized_poster_url() {
        let movie = Movie {
            id: "tt0111161".to_string(),
            title: "The Shawshank Redemption".to_string(),
            rating: 9.2,
            poster_url: "https://m.media-example.com/images/M/abc._V1_.jpg".to_string(),
        };
        assert_eq!(
            movie.resized_poster_url(),
            "https://m.media-example.com/images/M/abc._V0_UX600_.jpg"
        );
    }

    #[test]
    fn test_resized_poster_url_without_marker() {
        let movie = Movie {
            id: "tt1".to_string(),
            title: "Tesla".to_string(),
            rating: 5.1,
            poster_url: "https://example.com/poster.jpg".to_string(),
        };
        assert_eq!(movie.resized_poster_url(), movie.poster_url);
    }
}
