//! Scripted HTTP client shared by the pipeline tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::Mutex;

use bytes::Bytes;
use fetchline_fetch::{BoxStream, FetchOptions, Headers, HttpClient, Response};
use futures_util::{StreamExt, stream};

type Body = BoxStream<'static, io::Result<Bytes>>;

/// One canned answer.
pub enum Reply {
    /// Status, headers and body chunks; an `Err` chunk breaks the body off.
    Respond {
        status: u16,
        headers: Headers,
        chunks: Vec<io::Result<Bytes>>,
    },
    /// A head that never gets a body.
    Stall { status: u16 },
    /// No response at all.
    Refuse(io::ErrorKind),
}

impl Reply {
    pub fn ok(body: &'static str) -> Self {
        Reply::status(200, body)
    }

    pub fn status(status: u16, body: &'static str) -> Self {
        Reply::Respond {
            status,
            headers: Headers::new().with("content-length", body.len().to_string()),
            chunks: vec![Ok(Bytes::from_static(body.as_bytes()))],
        }
    }

    pub fn chunks(chunks: Vec<io::Result<Bytes>>) -> Self {
        Reply::Respond {
            status: 200,
            headers: Headers::new(),
            chunks,
        }
    }
}

/// Answers each URL from its own queue; an exhausted queue answers 404.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<(String, FetchOptions)>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn reply(self, url: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// URLs requested so far, in request order.
    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn options_for(&self, url: &str) -> Option<FetchOptions> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, options)| options.clone())
    }
}

impl HttpClient for ScriptedClient {
    type Error = io::Error;

    async fn get(&self, url: &str, options: &FetchOptions) -> io::Result<Response<io::Error>> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), options.clone()));
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(VecDeque::pop_front);

        let (status, headers, body): (u16, Headers, Body) = match reply {
            Some(Reply::Respond {
                status,
                headers,
                chunks,
            }) => (status, headers, Box::pin(stream::iter(chunks))),
            Some(Reply::Stall { status }) => (status, Headers::new(), stream::pending().boxed()),
            Some(Reply::Refuse(kind)) => {
                return Err(io::Error::new(kind, format!("{url} refused")));
            }
            None => (404, Headers::new(), Box::pin(stream::empty())),
        };
        Ok(Response::new(status, headers, body))
    }
}
