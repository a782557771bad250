//! Workout playlists with a mini player.

use dioxus::prelude::*;

use crate::app::components::{Card, EmptyState, ErrorView, Layout, LoadingView};
use crate::app::gate::RouterNavigator;
use crate::app::screen::use_screen;
use crate::app::session_context::use_services;
use crate::nav::{Navigator as _, Screen};
use crate::screens::playlists::{Player, Playlist};
use crate::view_state::ScreenView;

#[component]
pub fn Playlists() -> Element {
    let services = use_services();
    let data = use_screen("playlists", services.playlists.clone());
    let player = use_signal({
        let tracks = services.tracks.clone();
        move || Player::autoplay(tracks)
    });
    let nav = RouterNavigator::current();

    let state = data.get();
    let content = match ScreenView::from(&state) {
        ScreenView::Spinner => rsx! {
            LoadingView { message: "Loading playlists..." }
        },
        ScreenView::Failed(message) => rsx! {
            ErrorView {
                message: message.to_string(),
                hint: "Failed to load playlists.",
                screen: Screen::Playlists,
            }
        },
        ScreenView::Empty => rsx! {
            EmptyState {
                icon: "♫",
                title: "No playlists found.",
                hint: "Generate a new workout plan to get music suggestions!",
                action_label: "Generate Plan",
                on_action: move |_| nav.push(Screen::Workouts),
            }
        },
        ScreenView::Content(playlists) => rsx! {
            for playlist in playlists.iter() {
                PlaylistCard { key: "{playlist.name}", playlist: playlist.clone() }
            }
        },
    };

    rsx! {
        Layout { title: "Playlists".to_string(), active: Screen::Playlists,
            h1 { class: "page-header", "Workout Playlists" }
            {content}
            MiniPlayer { player }
        }
    }
}

#[component]
fn PlaylistCard(playlist: Playlist) -> Element {
    let link = playlist.link().map(|url| url.to_string());
    rsx! {
        Card { class: "playlist",
            if let Some(src) = playlist.image_url.as_deref() {
                img { class: "playlist-image", src: "{src}", alt: "{playlist.name}" }
            } else {
                div { class: "playlist-image", "♫" }
            }
            div {
                p { class: "playlist-name", "{playlist.name}" }
                p { class: "small-text", "{playlist.description}" }
                p { class: "secondary-text", "{playlist.meta_line()}" }
                if let Some(href) = link {
                    a { class: "btn btn-ghost", href: "{href}", target: "_blank", "Open in Spotify" }
                }
            }
        }
    }
}

#[component]
fn MiniPlayer(player: Signal<Player>) -> Element {
    let mut player = player;
    let current = player.read().current().cloned();
    let Some(track) = current else {
        return rsx! {};
    };
    let playing = player.read().is_playing();

    rsx! {
        div { class: "mini-player",
            if let Some(art) = track.album_art.as_deref() {
                img { class: "album-art", src: "{art}", alt: "{track.title}" }
            }
            div { class: "track-info",
                p { class: "track-title", "{track.title}" }
                p { class: "track-artist", "{track.artist}" }
            }
            button {
                class: "player-button",
                aria_label: if playing { "Pause" } else { "Play" },
                onclick: move |_| player.write().toggle(),
                if playing { "⏸" } else { "▶" }
            }
            button {
                class: "player-button",
                aria_label: "Skip",
                onclick: move |_| player.write().skip(),
                "⏭"
            }
        }
    }
}
