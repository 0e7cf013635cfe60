//! Interactive terminal screens
//!
//! Drives the flow controllers from prompts: capture → result card →
//! chat or feedback, the same navigation the mobile app offers.

use crate::api::GeoApi;
use crate::error::{GeoError, Result};
use crate::flows::{
    ChatFlow, ChatOutcome, FeedbackFlow, FeedbackForm, FeedbackOutcome, RecognitionFlow,
    RecognitionOutcome, ScreenScope,
};
use crate::media;
use crate::store::GeoStore;
use crate::terminal::{chat_bubble, print_notice, result_card, spinner};
use dialoguer::{Confirm, Input, Select};
use geogenie_common::{notice, Coordinates, Notice, RecognitionView, ResultAction, Suggestion};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

const QUIT_COMMANDS: &[&str] = &["/quit", "/exit", "/q"];

/// Feedback values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct FeedbackArgs {
    pub image: Option<PathBuf>,
    pub landmark: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub image_id: Option<String>,
}

fn interactive() -> bool {
    std::io::stdin().is_terminal()
}

fn prompt_err(e: dialoguer::Error) -> GeoError {
    GeoError::Prompt(e.to_string())
}

fn ask(prompt: &str, initial: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)
}

/// Coordinates to send with a photo: the ones given, or the photo's own
/// GPS data when asked for. Missing GPS aborts with the permission notice.
pub fn resolve_location(
    path: &Path,
    given: Option<Coordinates>,
    use_photo_location: bool,
) -> Result<Option<Coordinates>> {
    if given.is_some() || !use_photo_location {
        return Ok(given);
    }
    match media::location_from_photo(path) {
        Ok(location) => Ok(Some(location)),
        Err(error) => {
            tracing::warn!(%error, "photo has no usable location");
            print_notice(&Notice::error(notice::PERMISSION_DENIED));
            Err(error)
        }
    }
}

/// Upload a photo, show the result card and follow the chosen action.
pub async fn recognize(
    api: &dyn GeoApi,
    store: &mut GeoStore,
    parent: &ScreenScope,
    path: &Path,
    location: Option<Coordinates>,
    prompt: bool,
) -> Result<()> {
    let flow = RecognitionFlow::new(api, parent.child());

    let bar = spinner("Uploading photo...");
    let outcome = flow.upload_path(store, path, location).await;
    bar.finish_and_clear();

    let handoff = match outcome {
        RecognitionOutcome::Recognized(handoff) => handoff,
        RecognitionOutcome::Failed { error, notice } => {
            print_notice(&notice);
            return Err(error);
        }
        RecognitionOutcome::Busy => return Err(GeoError::Busy),
        RecognitionOutcome::Cancelled => return Err(GeoError::Cancelled),
    };

    let view = RecognitionView::from_handoff(&handoff);
    for line in result_card(&view) {
        println!("{}", line);
    }

    if !prompt || !interactive() {
        return Ok(());
    }

    let labels: Vec<&str> = view.actions.iter().map(ResultAction::label).collect();
    let choice = Select::new()
        .items(&labels)
        .default(0)
        .interact_opt()
        .map_err(prompt_err)?;
    let Some(index) = choice else {
        return Ok(());
    };

    match &view.actions[index] {
        ResultAction::ConfirmChat(place) => chat(api, store, parent, Some(place.clone()), None).await,
        ResultAction::Reject | ResultAction::AddInfo => {
            let args = FeedbackArgs {
                image: Some(path.to_path_buf()),
                ..Default::default()
            };
            feedback(api, parent, args).await
        }
    }
}

/// Chat about a place: confirm the name, then exchange messages.
pub async fn chat(
    api: &dyn GeoApi,
    store: &mut GeoStore,
    parent: &ScreenScope,
    place: Option<String>,
    message: Option<String>,
) -> Result<()> {
    let mut flow = ChatFlow::new(api, parent.child(), place.as_deref());

    while !flow.is_confirmed() {
        if !interactive() {
            return Err(GeoError::InvalidInput("a place name is required".into()));
        }
        println!("Start Chatting About a Place");
        let draft = ask("Enter a place name", place.as_deref().unwrap_or_default())?;
        flow.set_draft(draft);
        if !flow.confirm() {
            println!("A place name is required.");
        }
    }

    let place = flow.place().unwrap_or_default().to_string();
    println!("💬 Chatting about {} (type /quit to leave)\n", place);

    let mut typing = flow.subscribe_typing();
    let indicator = tokio::spawn(async move {
        let mut bar = None;
        while typing.changed().await.is_ok() {
            let is_typing = *typing.borrow_and_update();
            if is_typing {
                bar = Some(spinner("•••"));
            } else if let Some(b) = bar.take() {
                b.finish_and_clear();
            }
        }
    });

    let ansi = std::io::stdout().is_terminal();
    let result = match message {
        Some(text) => send_and_print(&flow, store, &text, ansi).await,
        None => chat_loop(&flow, store, ansi).await,
    };

    drop(flow);
    indicator.abort();
    result
}

async fn chat_loop(flow: &ChatFlow<'_>, store: &mut GeoStore, ansi: bool) -> Result<()> {
    loop {
        let text = ask("Message", "")?;
        if QUIT_COMMANDS.contains(&text.trim()) {
            return Ok(());
        }
        send_and_print(flow, store, &text, ansi).await?;
    }
}

async fn send_and_print(flow: &ChatFlow<'_>, store: &mut GeoStore, text: &str, ansi: bool) -> Result<()> {
    match flow.send(store, text).await {
        ChatOutcome::Replied(_) | ChatOutcome::ServerError => {
            if let Some(last) = store.chat().last() {
                println!("{}\n", chat_bubble(last, ansi));
            }
            Ok(())
        }
        ChatOutcome::Ignored => Ok(()),
        ChatOutcome::NotConfirmed => Err(GeoError::InvalidInput("no place selected".into())),
        ChatOutcome::Cancelled => Err(GeoError::Cancelled),
    }
}

/// Feedback form: photo, landmark, optional details, then submit.
pub async fn feedback(api: &dyn GeoApi, parent: &ScreenScope, args: FeedbackArgs) -> Result<()> {
    let flow = FeedbackFlow::new(api, parent.child());
    let mut form = FeedbackForm::new();
    let prompt = interactive();

    println!("📝 Submit Feedback\n");

    if let Err(error) = flow.load_landmarks(&mut form).await {
        tracing::warn!(%error, "landmark list unavailable; autocomplete disabled");
    }

    let image_path = match (&args.image, &args.image_id, prompt) {
        (Some(path), _, _) => Some(path.clone()),
        (None, None, true) => {
            let path = ask("Photo path", "")?;
            (!path.trim().is_empty()).then(|| PathBuf::from(path.trim()))
        }
        _ => None,
    };
    if let Some(path) = image_path {
        form.set_image(Some(media::load_image(&path).await?));
    }
    if let Some(id) = &args.image_id {
        form.resume_upload(id.clone());
    }

    match &args.landmark {
        Some(name) => choose_landmark_by_name(&mut form, name),
        None if prompt => pick_landmark(&mut form)?,
        None => {}
    }

    match &args.description {
        Some(text) => form.set_description(text.clone()),
        None if prompt => form.set_description(ask("Description (optional)", "")?),
        None => {}
    }

    fill_location(&flow, &mut form, &args, prompt)?;

    loop {
        if !form.can_submit() {
            let outcome = flow.submit(&mut form).await;
            if let Some(notice) = outcome.notice() {
                print_notice(notice);
            }
            return Err(GeoError::InvalidInput("photo and landmark are required".into()));
        }

        let bar = spinner("Submitting feedback...");
        let outcome = flow.submit(&mut form).await;
        bar.finish_and_clear();

        if let Some(notice) = outcome.notice() {
            print_notice(notice);
        }

        match outcome {
            FeedbackOutcome::Submitted { image_id, .. } => {
                tracing::debug!(%image_id, "feedback complete");
                return Ok(());
            }
            FeedbackOutcome::MetadataFailed { image_id, error, .. } => {
                println!("  The photo was uploaded as {}; details can be sent again.", image_id);
                let retry = prompt
                    && Confirm::new()
                        .with_prompt("Retry sending the details?")
                        .default(true)
                        .interact()
                        .map_err(prompt_err)?;
                if !retry {
                    return Err(error);
                }
            }
            FeedbackOutcome::UploadFailed { error, .. } => return Err(error),
            FeedbackOutcome::Rejected(_) => {
                return Err(GeoError::InvalidInput("photo and landmark are required".into()))
            }
            FeedbackOutcome::Busy => return Err(GeoError::Busy),
            FeedbackOutcome::Cancelled => return Err(GeoError::Cancelled),
        }
    }
}

/// Select an existing name exactly, otherwise offer it as new.
fn choose_landmark_by_name(form: &mut FeedbackForm, name: &str) {
    match form.known_landmarks().iter().find(|k| k.eq_ignore_ascii_case(name.trim())) {
        Some(known) => {
            let known = known.clone();
            form.select(known);
        }
        None => {
            form.set_search(name);
            if !form.use_new_landmark() {
                // partial matches exist but the user asked for this exact name
                form.select(name.trim());
            }
        }
    }
}

fn pick_landmark(form: &mut FeedbackForm) -> Result<()> {
    while form.selected().is_none() {
        let query = ask("Landmark (search)", form.search())?;
        form.set_search(query);

        match form.suggestion() {
            Suggestion::Hidden => println!("Type part of a landmark name."),
            Suggestion::Dropdown(names) => {
                let choice = Select::new()
                    .with_prompt("Matching landmarks")
                    .items(&names)
                    .default(0)
                    .interact_opt()
                    .map_err(prompt_err)?;
                if let Some(index) = choice {
                    form.select(names[index].clone());
                }
            }
            Suggestion::CreateNew(name) => {
                let create = Confirm::new()
                    .with_prompt(format!("Use “{}” as a new landmark?", name))
                    .default(true)
                    .interact()
                    .map_err(prompt_err)?;
                if create {
                    form.use_new_landmark();
                }
            }
        }
    }

    if let Some(selected) = form.selected() {
        println!("  ✓ {}{}", selected, if form.is_new_landmark() { " (new)" } else { "" });
    }
    Ok(())
}

fn fill_location(
    flow: &FeedbackFlow<'_>,
    form: &mut FeedbackForm,
    args: &FeedbackArgs,
    prompt: bool,
) -> Result<()> {
    if args.latitude.is_some() || args.longitude.is_some() {
        form.set_latitude(args.latitude.clone().unwrap_or_default());
        form.set_longitude(args.longitude.clone().unwrap_or_default());
        return Ok(());
    }
    if !prompt || form.image().is_none() {
        return Ok(());
    }

    let use_photo = Confirm::new()
        .with_prompt("Use the photo's location?")
        .default(true)
        .interact()
        .map_err(prompt_err)?;
    if use_photo {
        match flow.locate_from_photo(form) {
            Ok(location) => println!(
                "  Latitude: {:.6}\n  Longitude: {:.6}",
                location.latitude, location.longitude
            ),
            Err(notice) => print_notice(&notice),
        }
    }

    let (lat, lng) = form.coordinates();
    let (lat, lng) = (lat.to_string(), lng.to_string());
    form.set_latitude(ask("Latitude", &lat)?);
    form.set_longitude(ask("Longitude", &lng)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_given_coordinates_win() {
        let given = Some(Coordinates::new(12.5, 77.25));
        let location = resolve_location(Path::new("/nonexistent.jpg"), given, true).unwrap();
        assert_eq!(location, given);
        assert_eq!(resolve_location(Path::new("/nonexistent.jpg"), None, false).unwrap(), None);
    }

    #[test]
    fn test_photo_without_gps_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xD9]).unwrap();

        let result = resolve_location(&path, None, true);
        assert!(matches!(result, Err(GeoError::LocationUnavailable(_))));
    }
}
