//! JavaScript snippets for the browser capabilities.
//!
//! Long-lived objects (media streams, the active recognizer) are parked on
//! `window` so later snippets can reach them. Replies go back through
//! `dioxus.send` and are decoded by the reply types below.

use serde::Deserialize;

use lesson_core::config::{MediaConstraints, RecognitionSettings};
use lesson_core::model::{LessonEvent, ListenTicket, RecognitionFailure};

/// Id of the `<video>` element showing the camera preview.
pub const PREVIEW_ELEMENT_ID: &str = "lesson-preview";

//
// ─── REPLIES ───────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct PlatformSupport {
    pub speech: bool,
    pub media: bool,
    pub fullscreen: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MediaReply {
    pub granted: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FullscreenReply {
    pub ok: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SpeechReply {
    Start,
    Result { transcript: String, is_final: bool },
    Error { code: String },
    End,
}

impl SpeechReply {
    #[must_use]
    pub fn into_event(self, ticket: ListenTicket) -> LessonEvent {
        match self {
            SpeechReply::Start => LessonEvent::RecognitionStarted(ticket),
            SpeechReply::Result {
                transcript,
                is_final,
            } => LessonEvent::RecognitionResult {
                ticket,
                transcript,
                is_final,
            },
            SpeechReply::Error { code } => LessonEvent::RecognitionFailed {
                ticket,
                failure: RecognitionFailure::from_code(&code),
            },
            SpeechReply::End => LessonEvent::RecognitionEnded(ticket),
        }
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, SpeechReply::End)
    }
}

//
// ─── SCRIPTS ───────────────────────────────────────────────────────────────────
//

pub const SUPPORT_PROBE_SCRIPT: &str = r#"
    const el = document.documentElement;
    return {
        speech: !!(window.SpeechRecognition || window.webkitSpeechRecognition),
        media: !!(navigator.mediaDevices && navigator.mediaDevices.getUserMedia),
        fullscreen: !!(el.requestFullscreen || el.webkitRequestFullscreen
            || el.mozRequestFullScreen || el.msRequestFullscreen),
    };
"#;

pub(crate) fn request_media_script(handle: &str, constraints: MediaConstraints) -> String {
    format!(
        r#"(async function() {{
                    if (!navigator.mediaDevices || !navigator.mediaDevices.getUserMedia) {{
                        dioxus.send({{ granted: false, reason: "unsupported" }});
                        return;
                    }}
                    try {{
                        const stream = await navigator.mediaDevices.getUserMedia({{
                            video: {{ facingMode: {facing_mode:?} }},
                            audio: {audio},
                        }});
                        const streams = window.__lessonStreams || (window.__lessonStreams = {{}});
                        streams[{handle:?}] = stream;
                        dioxus.send({{ granted: true, reason: null }});
                    }} catch (err) {{
                        dioxus.send({{ granted: false, reason: String((err && err.name) || err) }});
                    }}
                }})();"#,
        facing_mode = constraints.facing_mode.as_str(),
        audio = constraints.audio,
        handle = handle,
    )
}

pub(crate) fn attach_preview_script(element_id: &str, handle: &str) -> String {
    format!(
        r#"(function() {{
                    const video = document.getElementById({element_id:?});
                    const streams = window.__lessonStreams || {{}};
                    const stream = streams[{handle:?}];
                    if (!video || !stream) {{
                        return;
                    }}
                    video.srcObject = stream;
                    const playing = video.play && video.play();
                    if (playing && playing.catch) {{
                        playing.catch(() => {{}});
                    }}
                }})();"#,
    )
}

/// Standard API first, then the vendor-prefixed variants.
pub(crate) const FULLSCREEN_SCRIPT: &str = r#"(async function() {
                    const el = document.documentElement;
                    const request = el.requestFullscreen
                        || el.webkitRequestFullscreen
                        || el.mozRequestFullScreen
                        || el.msRequestFullscreen;
                    if (!request) {
                        dioxus.send({ ok: false, reason: "unsupported" });
                        return;
                    }
                    try {
                        await request.call(el);
                        dioxus.send({ ok: true, reason: null });
                    } catch (err) {
                        dioxus.send({ ok: false, reason: String((err && err.name) || err) });
                    }
                })();"#;

pub(crate) fn speech_session_script(ticket: ListenTicket, settings: &RecognitionSettings) -> String {
    format!(
        r#"(function() {{
                    const Recognition = window.SpeechRecognition || window.webkitSpeechRecognition;
                    if (!Recognition) {{
                        dioxus.send({{ kind: "error", code: "unsupported" }});
                        dioxus.send({{ kind: "end" }});
                        return;
                    }}
                    const ticket = {ticket};
                    const state = window.__lessonSpeech || (window.__lessonSpeech = {{
                        ticket: null,
                        recognizer: null,
                    }});
                    if (state.recognizer) {{
                        try {{ state.recognizer.abort(); }} catch (_) {{}}
                    }}
                    const rec = new Recognition();
                    rec.lang = {language:?};
                    rec.interimResults = {interim_results};
                    rec.continuous = {continuous};
                    rec.onstart = () => dioxus.send({{ kind: "start" }});
                    rec.onresult = (event) => {{
                        let transcript = "";
                        let isFinal = false;
                        for (let i = event.resultIndex; i < event.results.length; i += 1) {{
                            transcript += event.results[i][0].transcript;
                            isFinal = event.results[i].isFinal;
                        }}
                        dioxus.send({{ kind: "result", transcript, is_final: isFinal }});
                    }};
                    rec.onerror = (event) => dioxus.send({{ kind: "error", code: event.error || "unknown" }});
                    rec.onend = () => {{
                        if (state.ticket === ticket) {{
                            state.ticket = null;
                            state.recognizer = null;
                        }}
                        dioxus.send({{ kind: "end" }});
                    }};
                    state.ticket = ticket;
                    state.recognizer = rec;
                    try {{
                        rec.start();
                    }} catch (err) {{
                        dioxus.send({{ kind: "error", code: String((err && err.name) || err) }});
                        dioxus.send({{ kind: "end" }});
                    }}
                }})();"#,
        ticket = ticket.value(),
        language = settings.language,
        interim_results = settings.interim_results,
        continuous = settings.continuous,
    )
}

pub(crate) fn stop_speech_script(ticket: ListenTicket) -> String {
    format!(
        r#"(function() {{
                    const state = window.__lessonSpeech;
                    if (state && state.recognizer && state.ticket === {ticket}) {{
                        state.recognizer.stop();
                    }}
                }})();"#,
        ticket = ticket.value(),
    )
}

pub(crate) fn play_cue_script(src: &str) -> String {
    format!(
        r#"(function() {{
                    try {{
                        const playing = new Audio({src:?}).play();
                        if (playing && playing.catch) {{
                            playing.catch(() => {{}});
                        }}
                    }} catch (_) {{}}
                }})();"#,
    )
}
