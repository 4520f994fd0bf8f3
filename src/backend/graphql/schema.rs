//! GraphQL schema: queries, mutations and subscriptions
//!
//! Resolvers are thin wrappers over `AuthService` and `PostService`. The
//! request's `IdentityContext` is attached to each execution as data.

use async_graphql::{Context, ErrorExtensions, Object, Result as GraphQLResult, Schema, Subscription, ID};
use futures_util::{Stream, StreamExt};
use uuid::Uuid;

use crate::backend::auth::service::AuthService;
use crate::backend::auth::sessions::IdentityContext;
use crate::backend::error::BackendError;
use crate::backend::graphql::types::{
    AuthUser, DeletedPostId, LoginData, MsgRes, NewUser, PostChange, PostData, PostObject, Posts, SignupData,
    UserObject,
};
use crate::backend::posts::service::PostService;
use crate::backend::realtime::gateway::{GatewayMessage, SubscriptionGateway};
use crate::shared::event::Channel;
use crate::shared::post::PostDraft;

/// The feed's GraphQL schema
pub type FeedSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the schema with the services resolvers need
pub fn build_schema(auth: AuthService, posts: PostService, gateway: SubscriptionGateway) -> FeedSchema {
    Schema::build(QueryRoot, MutationRoot, SubscriptionRoot)
        .data(auth)
        .data(posts)
        .data(gateway)
        .finish()
}

fn identity(ctx: &Context<'_>) -> IdentityContext {
    ctx.data_opt::<IdentityContext>().cloned().unwrap_or_default()
}

fn extend<T>(result: Result<T, BackendError>) -> GraphQLResult<T> {
    result.map_err(|e| e.extend())
}

fn parse_id(id: &ID) -> GraphQLResult<Uuid> {
    Uuid::parse_str(id.as_str()).map_err(|_| BackendError::not_found("No post found").extend())
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// One page of posts, newest first
    async fn posts(&self, ctx: &Context<'_>, page: Option<i32>) -> GraphQLResult<Posts> {
        let service = ctx.data::<PostService>()?;
        let page = extend(service.list(&identity(ctx), page.map(i64::from)).await)?;
        Ok(page.into())
    }

    async fn post(&self, ctx: &Context<'_>, post_id: ID) -> GraphQLResult<PostObject> {
        let identity = identity(ctx);
        extend(identity.require_user())?;
        let service = ctx.data::<PostService>()?;
        let post = extend(service.get(&identity, parse_id(&post_id)?).await)?;
        Ok(post.into())
    }

    /// The authenticated user
    async fn user(&self, ctx: &Context<'_>) -> GraphQLResult<UserObject> {
        let auth = ctx.data::<AuthService>()?;
        let user = extend(auth.current_user(&identity(ctx)).await)?;
        Ok(user.into())
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn login_user(&self, ctx: &Context<'_>, user: LoginData) -> GraphQLResult<AuthUser> {
        let auth = ctx.data::<AuthService>()?;
        let outcome = extend(auth.login(&user.email, &user.password).await)?;
        Ok(AuthUser {
            token: outcome.token,
            user_id: ID(outcome.user_id.to_string()),
        })
    }

    async fn signup_user(&self, ctx: &Context<'_>, user: SignupData) -> GraphQLResult<NewUser> {
        let auth = ctx.data::<AuthService>()?;
        let created = extend(auth.signup(&user.email, &user.name, &user.password).await)?;
        Ok(NewUser {
            user: ID(created.id.to_string()),
        })
    }

    async fn create_post(&self, ctx: &Context<'_>, post: PostData) -> GraphQLResult<PostObject> {
        let service = ctx.data::<PostService>()?;
        let draft = PostDraft::new(post.title, post.content, post.image_url);
        let created = extend(service.create(&identity(ctx), draft).await)?;
        Ok(created.into())
    }

    async fn update_post(&self, ctx: &Context<'_>, id: ID, post: PostData) -> GraphQLResult<PostObject> {
        let identity = identity(ctx);
        extend(identity.require_user())?;
        let service = ctx.data::<PostService>()?;
        let draft = PostDraft::new(post.title, post.content, post.image_url);
        let updated = extend(service.update(&identity, parse_id(&id)?, draft).await)?;
        Ok(updated.into())
    }

    async fn delete_post(&self, ctx: &Context<'_>, post_id: ID) -> GraphQLResult<MsgRes> {
        let identity = identity(ctx);
        extend(identity.require_user())?;
        let service = ctx.data::<PostService>()?;
        let deleted = extend(service.delete(&identity, parse_id(&post_id)?).await)?;
        Ok(MsgRes {
            message: deleted.message,
            id: ID(deleted.id.to_string()),
        })
    }

    async fn update_status(&self, ctx: &Context<'_>, status: String) -> GraphQLResult<UserObject> {
        let auth = ctx.data::<AuthService>()?;
        let user = extend(auth.update_status(&identity(ctx), &status).await)?;
        Ok(user.into())
    }
}

#[derive(Default)]
pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Posts created or updated from now on
    async fn change_post(&self, ctx: &Context<'_>) -> async_graphql::Result<impl Stream<Item = PostChange>> {
        let gateway = ctx.data::<SubscriptionGateway>()?;
        let connection = gateway.open(&[Channel::ChangePost]);
        tracing::debug!("GraphQL changePost subscription on {}", connection.id());

        Ok(connection.filter_map(|message| async move {
            match message {
                GatewayMessage::ChangePost(payload) => Some(PostChange::from(payload)),
                GatewayMessage::DeletePost(_) => None,
            }
        }))
    }

    /// Ids of posts deleted from now on
    async fn delete_post(&self, ctx: &Context<'_>) -> async_graphql::Result<impl Stream<Item = DeletedPostId>> {
        let gateway = ctx.data::<SubscriptionGateway>()?;
        let connection = gateway.open(&[Channel::DeletePost]);
        tracing::debug!("GraphQL deletePost subscription on {}", connection.id());

        Ok(connection.filter_map(|message| async move {
            match message {
                GatewayMessage::DeletePost(payload) => Some(DeletedPostId::from(payload)),
                GatewayMessage::ChangePost(_) => None,
            }
        }))
    }
}
