mod chat_client;
mod dispatcher;
mod helpers;
mod render;
mod streaming;
