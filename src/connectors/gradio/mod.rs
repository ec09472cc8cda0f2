//! Gradio connector
//!
//! Talks to a Gradio app (usually a Hugging Face Space) over its HTTP API:
//!
//! 1. `GET {base}/config` once, when the client is constructed, to learn the
//!    API prefix (`/gradio_api` on Gradio 5, empty before).
//! 2. `POST {base}{prefix}/call/{api_name}` with `{"data": [...]}` → `event_id`.
//! 3. `GET {base}{prefix}/call/{api_name}/{event_id}` → event stream holding the result.

mod client;
mod events;

pub use client::{space_url, GradioClient, GradioConnector};
