//! Page Handlers (HTML surface)
//!
//! Server-rendered post pages. Session auth is layered at the wiring site:
//! the account pages and vote routes require it, the home/post/search pages
//! only check it (comment posting silently requires a signed-in user, as
//! the original did).

use axum::Form;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::{Html, Redirect};
use kernel::principal::CurrentUser;
use platform::html;
use platform::media::Upload;

use crate::application::{
    CreatePostInput, CreatePostUseCase, DeleteImageUseCase, DeletePostUseCase, EditPostInput,
    EditPostUseCase, ListPostsUseCase, SearchPostsUseCase, ShowPostUseCase, Vote, VotePostUseCase,
};
use crate::domain::entities::Post;
use crate::error::{PostsError, PostsResult};
use crate::presentation::dto::{CommentForm, SearchQuery};
use crate::presentation::handlers::{PostsAppState, PostsRepo};

// ============================================================================
// Rendering helpers
// ============================================================================

fn post_item(post: &Post) -> String {
    format!(
        concat!(
            "<article>",
            "<h2><a href=\"/show_post/{}\">{}</a></h2>",
            "<p>{}</p>",
            "<p>{} likes, {} dislikes</p>",
            "</article>"
        ),
        post.id,
        html::escape(&post.title),
        html::escape(&post.text),
        post.likes,
        post.dislikes,
    )
}

fn post_list(title: &str, posts: &[Post]) -> Html<String> {
    let items: String = posts.iter().map(post_item).collect();
    let body = format!(
        concat!(
            "<h1>{}</h1>",
            "<form method=\"get\" action=\"/search\">",
            "<input name=\"search\" placeholder=\"Search\">",
            "<button type=\"submit\">Search</button>",
            "</form>",
            "{}",
            "<p><a href=\"/\">Home</a> <a href=\"/account/\">Account</a> ",
            "<a href=\"/login/\">Log in</a> <a href=\"/logout/\">Log out</a></p>"
        ),
        html::escape(title),
        items,
    );
    Html(html::page(title, &body))
}

// ============================================================================
// Public pages
// ============================================================================

/// GET /
pub async fn home<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
) -> PostsResult<Html<String>> {
    let use_case = ListPostsUseCase::new(state.repo.clone());
    let posts = use_case.all_by_created().await?;

    Ok(post_list("All posts", &posts))
}

/// GET /search?search=...
pub async fn search<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    Query(query): Query<SearchQuery>,
) -> PostsResult<Html<String>> {
    let use_case = SearchPostsUseCase::new(state.repo.clone());
    let posts = use_case.execute(&query.search).await?;

    Ok(post_list("Search results", &posts))
}

/// GET /show_post/{id}
pub async fn show_post<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    current_user: Option<CurrentUser>,
    Path(id): Path<i64>,
) -> PostsResult<Html<String>> {
    let use_case =
        ShowPostUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone());
    let details = use_case.execute(id).await?;

    let images: String = details
        .images
        .iter()
        .map(|img| {
            format!(
                "<figure><img src=\"/media/{}\" alt=\"\"></figure>",
                html::escape(&img.file_path)
            )
        })
        .collect();

    let comments: String = details
        .comments
        .iter()
        .map(|c| format!("<li>{}</li>", html::escape(&c.text)))
        .collect();

    let comment_form = if current_user.is_some() {
        format!(
            concat!(
                "<form method=\"post\" action=\"/show_post/{}\">",
                "<textarea name=\"text\" placeholder=\"Add a comment\"></textarea>",
                "<button type=\"submit\">Comment</button>",
                "</form>"
            ),
            id
        )
    } else {
        "<p><a href=\"/login/\">Log in</a> to comment</p>".to_string()
    };

    let body = format!(
        concat!(
            "<article>",
            "<h1>{}</h1>",
            "<p>{}</p>",
            "{}",
            "<p>{} likes, {} dislikes ",
            "<a href=\"/like/{}\">Like</a> <a href=\"/dislike/{}\">Dislike</a></p>",
            "</article>",
            "<ul>{}</ul>",
            "{}",
            "<p><a href=\"/\">Home</a></p>"
        ),
        html::escape(&details.post.title),
        html::escape(&details.post.text),
        images,
        details.post.likes,
        details.post.dislikes,
        id,
        id,
        comments,
        comment_form,
    );

    Ok(Html(html::page(&details.post.title, &body)))
}

/// POST /show_post/{id}
///
/// Adds a comment when a session is present; anonymous submissions are
/// dropped and the post is re-shown either way.
pub async fn show_post_comment<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    current_user: Option<CurrentUser>,
    Path(id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> PostsResult<Redirect> {
    if let Some(user) = current_user {
        let use_case =
            crate::application::AddCommentUseCase::new(state.repo.clone(), state.repo.clone());
        use_case.execute(&user.user_id, id, form.text).await?;
    }

    Ok(Redirect::to(&format!("/show_post/{id}")))
}

// ============================================================================
// Account pages (session required)
// ============================================================================

/// GET /account/
pub async fn account<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    current_user: CurrentUser,
) -> PostsResult<Html<String>> {
    let use_case = ListPostsUseCase::new(state.repo.clone());
    let posts = use_case.own(&current_user.user_id).await?;

    let items: String = posts
        .iter()
        .map(|post| {
            format!(
                concat!(
                    "<article>",
                    "<h2><a href=\"/show_post/{}\">{}</a></h2>",
                    "<p><a href=\"/account/edit_post/{}\">Edit</a> ",
                    "<a href=\"/account/delete_post/{}\">Delete</a></p>",
                    "</article>"
                ),
                post.id,
                html::escape(&post.title),
                post.id,
                post.id,
            )
        })
        .collect();

    let body = format!(
        concat!(
            "<h1>My posts</h1>",
            "<p><a href=\"/account/add_post\">Add post</a> ",
            "<a href=\"/account/edit\">Edit account</a> ",
            "<a href=\"/logout/\">Log out</a></p>",
            "{}"
        ),
        items
    );

    Ok(Html(html::page("My account", &body)))
}

fn post_form(action: &str, title: &str, text: &str) -> String {
    format!(
        concat!(
            "<form method=\"post\" action=\"{}\" enctype=\"multipart/form-data\">",
            "<input name=\"title\" placeholder=\"Title\" value=\"{}\">",
            "<textarea name=\"text\" placeholder=\"Text\">{}</textarea>",
            "<input type=\"file\" name=\"images\" multiple>",
            "<button type=\"submit\">Save</button>",
            "</form>"
        ),
        action,
        html::escape(title),
        html::escape(text),
    )
}

/// GET /account/add_post
pub async fn add_post_form() -> Html<String> {
    Html(html::page(
        "Add post",
        &format!("<h1>Add post</h1>{}", post_form("/account/add_post", "", "")),
    ))
}

/// Pull title/text/images out of a multipart form body
async fn read_post_form(mut multipart: Multipart) -> PostsResult<(Option<String>, String, Vec<Upload>)> {
    let mut title = None;
    let mut text = String::new();
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PostsError::Validation(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "images" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| PostsError::Validation(e.to_string()))?;
                if !file_name.is_empty() && !bytes.is_empty() {
                    images.push(Upload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            "title" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| PostsError::Validation(e.to_string()))?;
                if !value.trim().is_empty() {
                    title = Some(value);
                }
            }
            "text" => {
                text = field
                    .text()
                    .await
                    .map_err(|e| PostsError::Validation(e.to_string()))?;
            }
            _ => {}
        }
    }

    Ok((title, text, images))
}

/// POST /account/add_post
pub async fn add_post_submit<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    current_user: CurrentUser,
    multipart: Multipart,
) -> PostsResult<Redirect> {
    let (title, text, images) = read_post_form(multipart).await?;

    let use_case =
        CreatePostUseCase::new(state.repo.clone(), state.repo.clone(), state.media.clone());
    use_case
        .execute(
            &current_user.user_id,
            CreatePostInput {
                title,
                text,
                images,
            },
        )
        .await?;

    Ok(Redirect::to("/account/"))
}

/// GET /account/edit_post/{id}
pub async fn edit_post_form<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> PostsResult<Html<String>> {
    let use_case =
        ShowPostUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone());
    let details = use_case.execute(id).await?;

    // Another user's post reads as missing
    if !details.post.is_owned_by(&current_user.user_id) {
        return Err(PostsError::PostNotFound);
    }

    let images: String = details
        .images
        .iter()
        .map(|img| {
            format!(
                concat!(
                    "<li>{} ",
                    "<a href=\"/account/delete_image/{}/{}\">Delete</a></li>"
                ),
                html::escape(&img.file_path),
                id,
                img.id,
            )
        })
        .collect();

    let body = format!(
        "<h1>Edit post</h1>{}<ul>{}</ul>",
        post_form(
            &format!("/account/edit_post/{id}"),
            &details.post.title,
            &details.post.text
        ),
        images,
    );

    Ok(Html(html::page("Edit post", &body)))
}

/// POST /account/edit_post/{id}
pub async fn edit_post_submit<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> PostsResult<Redirect> {
    let (title, text, images) = read_post_form(multipart).await?;

    let use_case =
        EditPostUseCase::new(state.repo.clone(), state.repo.clone(), state.media.clone());
    use_case
        .execute(
            &current_user.user_id,
            id,
            EditPostInput {
                title,
                text,
                images,
            },
        )
        .await?;

    Ok(Redirect::to(&format!("/show_post/{id}")))
}

/// GET /account/delete_post/{id}
///
/// No ownership check; any signed-in user may delete any post here. The
/// API surface is the strict one.
pub async fn delete_post<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    _current_user: CurrentUser,
    Path(id): Path<i64>,
) -> PostsResult<Redirect> {
    let use_case =
        DeletePostUseCase::new(state.repo.clone(), state.repo.clone(), state.media.clone());
    use_case.execute_unchecked(id).await?;

    Ok(Redirect::to("/account/"))
}

/// GET /account/delete_image/{post_id}/{img_id}
pub async fn delete_image<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    _current_user: CurrentUser,
    Path((post_id, img_id)): Path<(i64, i64)>,
) -> PostsResult<Redirect> {
    let use_case = DeleteImageUseCase::new(state.repo.clone(), state.media.clone());
    use_case.execute(img_id).await?;

    Ok(Redirect::to(&format!("/account/edit_post/{post_id}")))
}

// ============================================================================
// Votes (session required, no vote deduplication)
// ============================================================================

/// GET /like/{post_id}
pub async fn like<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    _current_user: CurrentUser,
    Path(post_id): Path<i64>,
) -> PostsResult<Redirect> {
    let use_case = VotePostUseCase::new(state.repo.clone());
    use_case.execute(post_id, Vote::Like).await?;

    Ok(Redirect::to(&format!("/show_post/{post_id}")))
}

/// GET /dislike/{post_id}
pub async fn dislike<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    _current_user: CurrentUser,
    Path(post_id): Path<i64>,
) -> PostsResult<Redirect> {
    let use_case = VotePostUseCase::new(state.repo.clone());
    use_case.execute(post_id, Vote::Dislike).await?;

    Ok(Redirect::to(&format!("/show_post/{post_id}")))
}
