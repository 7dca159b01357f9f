//! Yearly archives of the post index.

use crate::post::PostSummary;

/// Returns the publication year of a post: the leading four digits of its
/// date, or `None` if the date doesn't start with a year.
pub fn year(post: &PostSummary) -> Option<&str> {
    let year = post.meta.date.get(..4)?;
    if year.bytes().all(|b| b.is_ascii_digit()) {
        Some(year)
    } else {
        None
    }
}

/// Returns every year with at least one post, newest first.
pub fn years(posts: &[PostSummary]) -> Vec<String> {
    let mut years: Vec<String> = posts.iter().filter_map(year).map(str::to_owned).collect();
    years.sort_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Returns the posts published in the year `wanted`, in index order.
pub fn posts_in_year<'a>(posts: &'a [PostSummary], wanted: &str) -> Vec<&'a PostSummary> {
    posts.iter().filter(|p| year(p) == Some(wanted)).collect()
}

/// Groups the posts by year, newest year first; each group keeps index
/// order.
pub fn by_year(posts: &[PostSummary]) -> Vec<(String, Vec<&PostSummary>)> {
    years(posts)
        .into_iter()
        .map(|y| {
            let in_year = posts_in_year(posts, &y);
            (y, in_year)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::post::PostMeta;

    fn post(slug: &str, date: &str) -> PostSummary {
        PostSummary {
            slug: slug.to_owned(),
            meta: PostMeta {
                title: slug.to_owned(),
                date: date.to_owned(),
                ..PostMeta::default()
            },
            read_time: 1,
        }
    }

    fn index() -> Vec<PostSummary> {
        vec![
            post("c", "2025-03-01"),
            post("b", "2025-01-10T09:00:00Z"),
            post("a", "2023-12-31"),
            post("undated", ""),
        ]
    }

    #[test]
    fn test_years() {
        assert_eq!(years(&index()), vec!["2025", "2023"]);
        assert!(years(&[]).is_empty());
    }

    #[test]
    fn test_posts_in_year() {
        let posts = index();
        let slugs: Vec<&str> = posts_in_year(&posts, "2025").iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c", "b"]);
        assert!(posts_in_year(&posts, "2024").is_empty());
    }

    #[test]
    fn test_by_year() {
        let posts = index();
        let groups = by_year(&posts);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "2025");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "2023");
        assert_eq!(groups[1].1[0].slug, "a");
    }

    #[test]
    fn test_year_requires_digits() {
        assert_eq!(year(&post("x", "soon")), None);
        assert_eq!(year(&post("x", "")), None);
        assert_eq!(year(&post("x", "1999-01-01")), Some("1999"));
    }
}
