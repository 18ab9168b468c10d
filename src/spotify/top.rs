use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::{
    Error, Res,
    spotify::SpotifyClient,
    types::{TokenPair, TopArtist, TopItemsRequest, TopItemsResponse, TopTrack},
};

impl SpotifyClient {
    /// Retrieves the user's top items of one kind.
    ///
    /// Calls `GET {api}/me/top/{artists|tracks}?limit=n` with the access
    /// token as bearer. Only the first page is read; the returned list never
    /// holds more than `request.limit` items.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(items))` - the items, in Spotify's ranking order
    /// - `Ok(None)` - the access token was refused with `401`; refresh it and
    ///   try again
    ///
    /// # Errors
    ///
    /// - [`Error::ResourceFetch`] for any other non-2xx status or a body
    ///   without an `items` array
    /// - [`Error::Http`] on transport failures and timeouts
    pub async fn top_items<T>(
        &self,
        request: &TopItemsRequest,
        token: &TokenPair,
    ) -> Res<Option<Vec<T>>>
    where
        T: DeserializeOwned,
    {
        let url = format!(
            "{api}/me/top/{kind}",
            api = self.config().api_url,
            kind = request.resource_type
        );

        let res = self
            .http
            .get(&url)
            .bearer_auth(&token.access_token)
            .query(&[("limit", request.limit)])
            .send()
            .await?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::ResourceFetch {
                resource: request.resource_type.to_string(),
                reason: format!("unexpected status {}", status),
            });
        }

        let mut body: TopItemsResponse<T> =
            res.json().await.map_err(|e| Error::ResourceFetch {
                resource: request.resource_type.to_string(),
                reason: format!("malformed response: {}", e),
            })?;

        body.items.truncate(request.limit as usize);
        Ok(Some(body.items))
    }

    pub async fn top_artists(&self, token: &TokenPair, limit: u32) -> Res<Option<Vec<TopArtist>>> {
        self.top_items(&TopItemsRequest::artists(limit), token).await
    }

    pub async fn top_tracks(&self, token: &TokenPair, limit: u32) -> Res<Option<Vec<TopTrack>>> {
        self.top_items(&TopItemsRequest::tracks(limit), token).await
    }
}
