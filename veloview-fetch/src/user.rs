//! Account lookup via the `User` query.

use serde_json::Value;

use veloview_core::VelogUser;

use crate::error::FetchError;
use crate::queries;
use crate::transport::{GqlReply, Transport};

/// Looks up an account by username.
///
/// Returns `None` when the server reports no such user.
pub async fn fetch_user(
    transport: &dyn Transport,
    username: &str,
) -> Result<Option<VelogUser>, FetchError> {
    let reply = transport
        .execute(
            "User",
            queries::USER_QUERY,
            queries::user_variables(username),
        )
        .await?;

    match reply {
        GqlReply::Data(data) => match data.get("user") {
            None | Some(Value::Null) => Ok(None),
            Some(user) => Ok(Some(serde_json::from_value(user.clone())?)),
        },
        GqlReply::Error(err) => Err(FetchError::Graphql {
            code: err.code,
            message: err.message,
        }),
    }
}
