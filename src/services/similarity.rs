use std::collections::HashSet;

/// A de-duplicated view over a movie's genre tags
pub type GenreSet<'a> = HashSet<&'a str>;

/// Collapses a genre list into a set, dropping duplicate tags
pub fn genre_set<S: AsRef<str>>(genres: &[S]) -> GenreSet<'_> {
    genres.iter().map(|g| g.as_ref()).collect()
}

/// Jaccard similarity between two genre sets
///
/// Returns `intersection / union`, or `0.0` when both sets are empty.
pub fn jaccard<'a>(a: &GenreSet<'a>, b: &GenreSet<'a>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        return 0.0;
    }

    intersection as f64 / union as f64
}

/// Jaccard similarity between two genre lists, treating each as a set
pub fn genre_similarity<A: AsRef<str>, B: AsRef<str>>(a: &[A], b: &[B]) -> f64 {
    jaccard(&genre_set(a), &genre_set(b))
}
