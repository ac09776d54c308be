use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::debug;

use crate::analytics::{AggregateMetrics, Analytics};
use crate::config::Settings;
use crate::engine::assess_turn;
use crate::risk::{Explanation, RiskAssessment};
use crate::rolling::{summarize_window, WindowSummary};
use crate::session::{normalize_sid, SessionStore, TurnRecord};
use crate::tips::{TipIndex, TipMatch, DEFAULT_K};
use crate::triggers::TriggerSet;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub tips: Arc<TipIndex>,
    pub sessions: Arc<SessionStore>,
    pub analytics: Arc<Analytics>,
}

impl AppState {
    /// Build state from settings; the tip index is fitted here, once.
    pub fn from_settings(settings: Settings) -> Self {
        let tips = TipIndex::build(&settings.tips_path);
        Self::with_index(settings, tips)
    }

    pub fn with_index(settings: Settings, tips: TipIndex) -> Self {
        Self {
            sessions: Arc::new(SessionStore::with_turn_cap(settings.max_turns_kept)),
            analytics: Arc::new(Analytics::with_capacity(settings.analytics_max_records)),
            tips: Arc::new(tips),
            settings: Arc::new(settings),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/voice_chat", post(voice_chat))
        .route("/api/session_summary", get(session_summary))
        .route("/api/tips", get(tips))
        .route("/api/analytics", get(analytics))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResp {
    ok: bool,
}

async fn health() -> Json<HealthResp> {
    Json(HealthResp { ok: true })
}

#[derive(Deserialize)]
struct VoiceTurn {
    #[serde(default)]
    sid: String,
    text: String,
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Serialize)]
struct VoiceChatResp {
    reply: String,
    risk: f64,
    triggers: TriggerSet,
    tips: Vec<TipMatch>,
    ts: String,
    turn_count: usize,
    explanation: Explanation,
}

async fn voice_chat(State(state): State<AppState>, Json(turn): Json<VoiceTurn>) -> Json<VoiceChatResp> {
    let sid = normalize_sid(&turn.sid);
    let ts = turn
        .timestamp
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| Utc::now().to_rfc3339());
    state.sessions.ensure(&sid, &ts);

    let out = assess_turn(&turn.text, Some(ts.as_str()), &state.tips, state.settings.tips_per_turn);

    let rec = TurnRecord {
        ts: ts.clone(),
        text: turn.text,
        emotion: out.sentiment,
        risk: out.assessment,
        reply: out.reply,
        tips: out.tips,
    };
    let turn_count = state.sessions.append(&sid, rec.clone());

    let window: Vec<RiskAssessment> = state
        .sessions
        .last_n(&sid, state.settings.summary_window.max(1))
        .into_iter()
        .map(|t| t.risk)
        .collect();
    state
        .analytics
        .record_turn(&sid, &rec, Some(summarize_window(&window)));

    debug!(target: "api", sid = %sid, turn_count, "voice_chat handled");
    Json(VoiceChatResp {
        reply: rec.reply,
        risk: rec.risk.risk,
        triggers: rec.risk.triggers,
        tips: rec.tips,
        ts,
        turn_count,
        explanation: rec.risk.explanation,
    })
}

#[derive(Deserialize)]
struct SummaryQuery {
    sid: String,
    #[serde(default)]
    window: Option<i64>,
}

#[derive(Serialize)]
struct TurnOut {
    ts: String,
    text: String,
    risk: RiskAssessment,
    reply: String,
    tips: Vec<TipMatch>,
}

#[derive(Serialize)]
struct SummaryResp {
    sid: String,
    created_at: Option<String>,
    turns: Vec<TurnOut>,
    summary: WindowSummary,
    count: usize,
}

async fn session_summary(
    State(state): State<AppState>,
    Query(q): Query<SummaryQuery>,
) -> Json<SummaryResp> {
    let sid = normalize_sid(&q.sid);
    let Some(sess) = state.sessions.get(&sid) else {
        return Json(SummaryResp {
            sid,
            created_at: None,
            turns: Vec::new(),
            summary: WindowSummary::empty(),
            count: 0,
        });
    };

    let window = match q.window {
        Some(w) => usize::try_from(w.max(1)).unwrap_or(usize::MAX),
        None => state.settings.summary_window.max(1),
    };
    let start = sess.turns.len().saturating_sub(window);
    let summary = summarize_window(sess.turns[start..].iter().map(|t| &t.risk));

    let keep_from = sess.turns.len().saturating_sub(state.settings.max_turns_kept);
    let turns: Vec<TurnOut> = sess.turns[keep_from..]
        .iter()
        .map(|t| TurnOut {
            ts: t.ts.clone(),
            text: t.text.clone(),
            risk: t.risk.clone(),
            reply: t.reply.clone(),
            tips: t.tips.clone(),
        })
        .collect();

    Json(SummaryResp {
        sid,
        created_at: Some(sess.created_at),
        count: turns.len(),
        turns,
        summary,
    })
}

#[derive(Deserialize)]
struct TipsQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    k: Option<usize>,
}

async fn tips(State(state): State<AppState>, Query(q): Query<TipsQuery>) -> Json<Vec<TipMatch>> {
    Json(state.tips.query(&q.q, q.k.unwrap_or(DEFAULT_K)))
}

async fn analytics(State(state): State<AppState>) -> Json<AggregateMetrics> {
    Json(state.analytics.aggregate())
}
