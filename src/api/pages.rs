//! Server-rendered pages and form endpoints.
//!
//! Page routes check the session themselves and redirect anonymous
//! visitors to the login page instead of answering 401 like the JSON API.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, CreateBook},
    AppState,
};

use super::SESSION_USER_KEY;

async fn session_user(session: &Session) -> AppResult<Option<i32>> {
    Ok(session.get::<i32>(SESSION_USER_KEY).await?)
}

/// Book list page
pub async fn index(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let Some(user_id) = session_user(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let books = state
        .services
        .books
        .list(user_id, &BookQuery::default())
        .await?;

    Ok(Html(render_index(&books)).into_response())
}

/// Login form page
pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// Signup form page
pub async fn signup_page() -> Html<&'static str> {
    Html(SIGNUP_PAGE)
}

/// Book create form fields; empty strings mean "not provided"
#[derive(Debug, Deserialize)]
pub struct AddBookForm {
    title: String,
    author: String,
    #[serde(default)]
    isbn: Option<String>,
    #[serde(default)]
    rating: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    genre: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Form-flow book creation; redirects back to the list page
pub async fn add_book(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddBookForm>,
) -> AppResult<Response> {
    let Some(user_id) = session_user(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let payload = CreateBook {
        title: form.title,
        author: form.author,
        isbn: non_empty(form.isbn),
        rating: form.rating.as_deref().and_then(|r| r.trim().parse().ok()),
        notes: non_empty(form.notes),
        status: form
            .status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        genre: non_empty(form.genre),
    };

    state.services.books.create(user_id, payload).await?;

    Ok(Redirect::to("/").into_response())
}

/// Form-flow book deletion; redirects back to the list page
pub async fn delete_book(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let Some(user_id) = session_user(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    state.services.books.delete(user_id, id).await?;

    Ok(Redirect::to("/").into_response())
}

#[derive(Debug, Deserialize)]
pub struct OpenLibraryForm {
    #[serde(default)]
    isbn: Option<String>,
    #[serde(default)]
    olid: Option<String>,
}

/// Redirect to the book's Open Library page, preferring the edition key
pub async fn open_library_redirect(
    State(state): State<AppState>,
    Form(form): Form<OpenLibraryForm>,
) -> Redirect {
    let base = state.config.openlibrary.base_url.trim_end_matches('/');

    if let Some(olid) = non_empty(form.olid) {
        return Redirect::to(&format!("{}/books/{}", base, olid));
    }
    if let Some(isbn) = non_empty(form.isbn) {
        return Redirect::to(&format!("{}/isbn/{}", base, isbn));
    }

    Redirect::to("/")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_index(books: &[Book]) -> String {
    let mut rows = String::new();
    for book in books {
        let rating = book
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td><form method=\"post\" action=\"/delete/{}\"><button>Delete</button></form></td></tr>\n",
            escape_html(&book.title),
            escape_html(&book.author),
            escape_html(book.status.as_str()),
            rating,
            escape_html(&book.isbn),
            book.id,
        ));
    }

    format!(
        "<!doctype html><html><head><title>Shelfnotes</title></head><body>\
         <h1>My books</h1>\
         <form method=\"post\" action=\"/api/auth/logout\" \
           onsubmit=\"event.preventDefault();fetch('/api/auth/logout',{{method:'POST'}}).then(()=>location='/login')\">\
           <button>Log out</button></form>\
         <form method=\"post\" action=\"/add\">\
           <input name=\"title\" placeholder=\"Title\" required>\
           <input name=\"author\" placeholder=\"Author\" required>\
           <input name=\"isbn\" placeholder=\"ISBN (optional)\">\
           <input name=\"rating\" placeholder=\"Rating\">\
           <input name=\"genre\" placeholder=\"Genre\">\
           <select name=\"status\">\
             <option>Want to Read</option><option>Reading</option><option>Read</option>\
           </select>\
           <input name=\"notes\" placeholder=\"Notes\">\
           <button>Add</button>\
         </form>\
         <table border=\"1\">\
           <tr><th>Title</th><th>Author</th><th>Status</th><th>Rating</th><th>ISBN</th><th></th></tr>\n{}\
         </table></body></html>",
        rows
    )
}

const LOGIN_PAGE: &str = r#"<!doctype html><html><head><title>Log in - Shelfnotes</title></head><body>
<h1>Log in</h1>
<form onsubmit="event.preventDefault();
  fetch('/api/auth/login',{method:'POST',headers:{'Content-Type':'application/json'},
    body:JSON.stringify({username:this.username.value,password:this.password.value})})
  .then(r=>r.ok?location='/':r.json().then(b=>alert(b.error)))">
  <input name="username" placeholder="Username" required>
  <input name="password" type="password" placeholder="Password" required>
  <button>Log in</button>
</form>
<p>No account? <a href="/signup">Sign up</a></p>
</body></html>"#;

const SIGNUP_PAGE: &str = r#"<!doctype html><html><head><title>Sign up - Shelfnotes</title></head><body>
<h1>Sign up</h1>
<form onsubmit="event.preventDefault();
  fetch('/api/auth/signup',{method:'POST',headers:{'Content-Type':'application/json'},
    body:JSON.stringify({username:this.username.value,password:this.password.value})})
  .then(r=>r.ok?location='/login':r.json().then(b=>alert(b.error)))">
  <input name="username" placeholder="Username" required>
  <input name="password" type="password" placeholder="Password" required>
  <button>Sign up</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>
</body></html>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book::BookStatus;
    use chrono::Utc;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Dune" & more</b>"#),
            "&lt;b&gt;&quot;Dune&quot; &amp; more&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_index_escapes_fields() {
        let book = Book {
            id: 1,
            user_id: 1,
            title: "<script>x</script>".to_string(),
            author: "A".to_string(),
            isbn: String::new(),
            cover_edition_key: String::new(),
            rating: None,
            notes: None,
            status: BookStatus::WantToRead,
            genre: None,
            created_at: Utc::now(),
        };
        let html = render_index(&[book]);
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
