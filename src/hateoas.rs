//! Hypermedia annotations for API responses.
//!
//! Every entity is returned wrapped in a [`Resource`] that lists the
//! follow-up requests a client can make, with relative hrefs.

use serde::Serialize;

use crate::entities::{player, registration, tournament};

/// A single hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    pub method: &'static str,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: &'static str) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method,
        }
    }

    pub fn get(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self::new(href, rel, "GET")
    }
}

/// An entity plus its links: `{ "data": ..., "links": [...] }`.
#[derive(Debug, Clone, Serialize)]
pub struct Resource<T> {
    pub data: T,
    pub links: Vec<Link>,
}

impl<T> Resource<T> {
    pub const fn new(data: T, links: Vec<Link>) -> Self {
        Self { data, links }
    }
}

/// Tournament payload, with direct children filled in on request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentData {
    pub name: String,
    pub parent_tournament_name: Option<String>,
    pub sub_tournaments: Vec<tournament::Model>,
}

pub fn player_links(gamertag: &str) -> Vec<Link> {
    let href = format!("/api/players/{gamertag}");
    vec![
        Link::get(&href, "self"),
        Link::new(&href, "update", "PUT"),
        Link::new(&href, "delete", "DELETE"),
        Link::get(format!("{href}/tournaments"), "tournaments"),
    ]
}

pub fn player_resource(player: player::Model) -> Resource<player::Model> {
    let links = player_links(&player.gamertag);
    Resource::new(player, links)
}

pub fn tournament_links(name: &str, parent: Option<&str>) -> Vec<Link> {
    let href = format!("/api/tournaments/{name}");
    let mut links = vec![
        Link::get(&href, "self"),
        Link::new(&href, "update", "PUT"),
        Link::new(&href, "delete", "DELETE"),
        Link::get(format!("{href}?include=sub-tournaments"), "sub-tournaments"),
        Link::new(format!("{href}/players/{{gamertag}}"), "register-player", "POST"),
        Link::get(format!("{href}/players"), "registered-players"),
    ];
    if let Some(parent) = parent {
        links.push(Link::get(
            format!("/api/tournaments/{parent}"),
            "parent-tournament",
        ));
    }
    links
}

pub fn tournament_resource(
    tournament: tournament::Model,
    sub_tournaments: Vec<tournament::Model>,
) -> Resource<TournamentData> {
    let links = tournament_links(&tournament.name, tournament.parent_tournament_name.as_deref());
    Resource::new(
        TournamentData {
            name: tournament.name,
            parent_tournament_name: tournament.parent_tournament_name,
            sub_tournaments,
        },
        links,
    )
}

pub fn registration_links(tournament_name: &str, gamertag: &str) -> Vec<Link> {
    vec![
        Link::get(
            format!("/api/tournaments/{tournament_name}/players/{gamertag}"),
            "self",
        ),
        Link::new(
            format!("/api/registrations/{tournament_name}/{gamertag}"),
            "delete",
            "DELETE",
        ),
        Link::get(format!("/api/players/{gamertag}"), "player"),
        Link::get(format!("/api/tournaments/{tournament_name}"), "tournament"),
    ]
}

pub fn registration_resource(registration: registration::Model) -> Resource<registration::Model> {
    let links = registration_links(&registration.tournament_name, &registration.player_gamertag);
    Resource::new(registration, links)
}
