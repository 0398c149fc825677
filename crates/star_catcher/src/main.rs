use bevy::app::AppExit;

fn main() -> AppExit {
    star_catcher::run()
}
