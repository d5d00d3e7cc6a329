mod api;
mod components;
mod config;
mod dom;
mod pages;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/admin")]
    Admin {},
    #[route("/admin/edit/:id")]
    AdminEdit { id: String },
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::map_page::MapPage { admin: false, editing_id: None::<String> }
    }
}

#[component]
fn Admin() -> Element {
    rsx! {
        pages::map_page::MapPage { admin: true, editing_id: None::<String> }
    }
}

#[component]
fn AdminEdit(id: String) -> Element {
    rsx! {
        pages::map_page::MapPage { admin: true, editing_id: Some(id) }
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
