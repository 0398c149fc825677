use bevy::prelude::*;
use bevy_asset_loader::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::assets::AssetState;
use crate::config::{JUMP_VOLUME, MUSIC_VOLUME};
use crate::session::Cue;

/// Background music lives on its own channel so it can be stopped alone.
#[derive(Resource)]
pub struct MusicChannel;

#[derive(AssetCollection, Resource)]
struct AudioAssets {
    #[asset(path = "sounds/time_for_adventure.mp3")]
    music: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "sounds/coin.wav")]
    coin: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "sounds/explosion.wav")]
    explosion: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "sounds/jump.wav")]
    jump: Handle<bevy_kira_audio::prelude::AudioSource>,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    StartMusic,
    StopMusic,
    Play(Cue),
}

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .add_audio_channel::<MusicChannel>()
            .add_event::<SoundEvent>()
            .configure_loading_state(
                LoadingStateConfig::new(AssetState::Loading).load_collection::<AudioAssets>(),
            )
            .add_systems(
                Update,
                play_sounds.run_if(in_state(AssetState::Loaded)),
            );
    }
}

fn play_sounds(
    audio_assets: Res<AudioAssets>,
    audio: Res<Audio>,
    music: Res<AudioChannel<MusicChannel>>,
    mut sound_events: EventReader<SoundEvent>,
) {
    for event in sound_events.read() {
        match event {
            SoundEvent::StartMusic => {
                music.stop();
                music
                    .play(audio_assets.music.clone_weak())
                    .looped()
                    .with_volume(MUSIC_VOLUME);
            }
            SoundEvent::StopMusic => {
                music.stop();
            }
            SoundEvent::Play(Cue::Coin) => {
                audio.play(audio_assets.coin.clone_weak());
            }
            SoundEvent::Play(Cue::Explosion) => {
                audio.play(audio_assets.explosion.clone_weak());
            }
            SoundEvent::Play(Cue::Jump) => {
                audio
                    .play(audio_assets.jump.clone_weak())
                    .with_volume(JUMP_VOLUME);
            }
        }
    }
}
