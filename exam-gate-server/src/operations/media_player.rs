use exam_gate::config::Settings;
use serde::Serialize;

/// Flags the host injects into the embedded media player's environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MediaPlayerEnv {
    pub seb_enabled: bool,
    pub seb_hide_all_media_controls: bool,
    pub seb_disable_media_seek: bool,
}

/// `None` unless the plugin is enabled and at least one media restriction is
/// switched on.
pub fn media_player_env(settings: &Settings) -> Option<MediaPlayerEnv> {
    if !settings.enabled {
        return None;
    }
    if !(settings.hide_all_media_controls || settings.disable_media_seek) {
        return None;
    }

    Some(MediaPlayerEnv {
        seb_enabled: true,
        seb_hide_all_media_controls: settings.hide_all_media_controls,
        seb_disable_media_seek: settings.disable_media_seek,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_injected_without_restrictions() {
        assert_eq!(media_player_env(&Settings::default()), None);
    }

    #[test]
    fn nothing_injected_when_plugin_disabled() {
        let settings = Settings {
            enabled: false,
            disable_media_seek: true,
            ..Default::default()
        };
        assert_eq!(media_player_env(&settings), None);
    }

    #[test]
    fn seek_restriction_serializes_for_js_env() {
        let settings = Settings {
            disable_media_seek: true,
            ..Default::default()
        };
        let env = media_player_env(&settings).unwrap();

        let json = serde_json::to_value(env).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "SEB_ENABLED": true,
                "SEB_HIDE_ALL_MEDIA_CONTROLS": false,
                "SEB_DISABLE_MEDIA_SEEK": true,
            })
        );
    }
}
