//! Plain-text rendering of the mounted screen.

use musicbook_client::{Rating, Review};
use musicbook_screens::{
    AlbumDetailScreen, App, Chrome, Loadable, LoginScreen, MyReviewsScreen, Screen, SearchScreen,
};

/// Render the screen on display, inside the chrome when it has one.
pub fn app(app: &App) -> String {
    let mut lines = Vec::new();
    if let Some(chrome) = app.chrome() {
        lines.push(chrome_bar(chrome));
        lines.push(String::new());
    }

    lines.extend(match app.screen() {
        Screen::Login(screen) => login(screen),
        Screen::Search(screen) => search(screen),
        Screen::AlbumDetail(screen) => album_detail(screen),
        Screen::MyReviews(screen) => my_reviews(screen),
    });

    lines.join("\n")
}

fn chrome_bar(chrome: &Chrome) -> String {
    let links: Vec<String> = chrome
        .links()
        .iter()
        .map(|link| format!("[{}] {}", link.label, link.route))
        .collect();
    format!("{} | [Logout]", links.join(" | "))
}

fn login(screen: &LoginScreen) -> Vec<String> {
    let mut lines = vec!["Log in".to_string()];
    if let Some(error) = screen.error() {
        lines.push(error.to_string());
    }
    lines.push("Run `musicbook login -u <username> -p <password>` to continue.".to_string());
    lines
}

fn search(screen: &SearchScreen) -> Vec<String> {
    let mut lines = vec!["Search Albums".to_string()];
    if !screen.query.is_empty() {
        lines.push(format!("Query: {}", screen.query));
    }
    if let Some(alert) = screen.alert() {
        lines.push(format!("! {alert}"));
    }

    let rows = screen.rows();
    if rows.is_empty() {
        lines.push("No results.".to_string());
    }
    for row in rows {
        lines.push(format!("  {}  ({})", row.label, row.route));
    }
    lines
}

fn album_detail(screen: &AlbumDetailScreen) -> Vec<String> {
    let view = match screen.state() {
        Loadable::Idle | Loadable::Loading => return vec!["Loading...".to_string()],
        Loadable::Failed(message) => return vec![(*message).to_string()],
        Loadable::Ready(view) => view,
    };

    let details = &view.details;
    let mut lines = vec![details.name.clone()];
    lines.push(format!("by {}", details.artist_names()));
    if let Some(date) = &details.release_date {
        lines.push(format!("Released: {date}"));
    }
    if let Some(label) = &details.label {
        lines.push(format!("Label: {label}"));
    }
    if !details.genres.is_empty() {
        lines.push(format!("Genres: {}", details.genres.join(", ")));
    }
    if let Some(cover) = details.cover() {
        lines.push(format!("Cover: {}", cover.url));
    }

    lines.push(String::new());
    lines.push(format!("Reviews ({})", view.reviews.len()));
    if view.reviews.is_empty() {
        lines.push("  No reviews yet.".to_string());
    }
    lines.extend(view.reviews.iter().map(review_line));

    if let Some(alert) = screen.alert() {
        lines.push(String::new());
        lines.push(format!("! {alert}"));
    }

    lines.push(String::new());
    lines.push(format!(
        "Your review: rating {} of [{}]",
        screen.form.rating,
        rating_options()
    ));
    if !screen.form.comment.is_empty() {
        lines.push(format!("  \"{}\"", screen.form.comment));
    }
    lines
}

fn my_reviews(screen: &MyReviewsScreen) -> Vec<String> {
    let mut lines = vec!["My Reviews".to_string()];
    match screen.state() {
        Loadable::Idle | Loadable::Loading => lines.push("Loading...".to_string()),
        Loadable::Failed(message) => lines.push((*message).to_string()),
        Loadable::Ready(reviews) if reviews.is_empty() => {
            lines.push("You have not reviewed anything yet.".to_string());
        }
        Loadable::Ready(_) => {
            for row in screen.rows() {
                let link = row.route.map(|r| format!("  ({r})")).unwrap_or_default();
                lines.push(format!("  {} {}/5{}", row.album_title, row.rating, link));
                if !row.comment.is_empty() {
                    lines.push(format!("    {}", row.comment));
                }
            }
        }
    }
    lines
}

fn review_line(review: &Review) -> String {
    let date = review
        .created_at
        .map(|at| format!(" on {}", at.format("%Y-%m-%d")))
        .unwrap_or_default();
    format!(
        "  {}/5 {}{}: {}",
        review.rating, review.user, date, review.comment
    )
}

fn rating_options() -> String {
    Rating::options()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
