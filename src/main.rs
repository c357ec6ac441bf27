mod bridge;
mod components;
mod gesture;
mod mesh;
mod model;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
