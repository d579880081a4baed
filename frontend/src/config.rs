pub use client::CONFIG;

pub struct ContestLink {
    pub slug: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
}

/// Contests offered on the landing page. The API may know more; any slug in
/// the URL is passed through as-is.
pub const CONTESTS: &[ContestLink] = &[
    ContestLink {
        slug: "costumes",
        name: "Costume Throwdown",
        tagline: "Show off the spookiest, silliest and most handmade looks.",
    },
    ContestLink {
        slug: "pumpkins",
        name: "The Great Pumpkin-Off",
        tagline: "Carved, painted or stacked: every gourd gets its moment.",
    },
];

pub fn contest_name(slug: &str) -> &str {
    CONTESTS.iter()
        .find(|contest| contest.slug == slug)
        .map(|contest| contest.name)
        .unwrap_or(slug)
}
