//! Catalog persistence. Every function is a single statement against the
//! shared pool; callers translate row counts and `Option`s into HTTP statuses.

use sqlx::PgPool;

use super::models::{Album, Artist, Genre, Label, Producer, User};

pub mod artists {
    use super::*;

    pub async fn list(pool: &PgPool) -> Result<Vec<Artist>, sqlx::Error> {
        sqlx::query_as::<_, Artist>(
            "SELECT id, rating, name, photo, wikipedia_url, spotify_url, tidal_url \
             FROM artists ORDER BY name ASC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Artist>, sqlx::Error> {
        sqlx::query_as::<_, Artist>(
            "SELECT id, rating, name, photo, wikipedia_url, spotify_url, tidal_url \
             FROM artists WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn insert(pool: &PgPool, artist: &Artist) -> Result<i32, sqlx::Error> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO artists (rating, name, photo, wikipedia_url, spotify_url, tidal_url) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(artist.rating)
        .bind(&artist.name)
        .bind(&artist.photo)
        .bind(&artist.wikipedia_url)
        .bind(&artist.spotify_url)
        .bind(&artist.tidal_url)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    pub async fn update(pool: &PgPool, artist: &Artist) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE artists SET rating = $1, name = $2, photo = $3, wikipedia_url = $4, \
             spotify_url = $5, tidal_url = $6 WHERE id = $7",
        )
        .bind(artist.rating)
        .bind(&artist.name)
        .bind(&artist.photo)
        .bind(&artist.wikipedia_url)
        .bind(&artist.spotify_url)
        .bind(&artist.tidal_url)
        .bind(artist.id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub mod albums {
    use super::*;

    const COLUMNS: &str = "id, rating, release_date, name, photo, wikipedia_url, \
                           spotify_url, tidal_url, artist_id, label_id, producer_id, genre_id";

    pub async fn list(pool: &PgPool) -> Result<Vec<Album>, sqlx::Error> {
        sqlx::query_as::<_, Album>(&format!(
            "SELECT {COLUMNS} FROM albums ORDER BY name ASC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Album>, sqlx::Error> {
        sqlx::query_as::<_, Album>(&format!("SELECT {COLUMNS} FROM albums WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Albums belonging to one parent record (artist, label, producer or genre)
    async fn by_parent(pool: &PgPool, column: &str, id: i32) -> Result<Vec<Album>, sqlx::Error> {
        sqlx::query_as::<_, Album>(&format!(
            "SELECT {COLUMNS} FROM albums WHERE {column} = $1 ORDER BY name ASC"
        ))
        .bind(id)
        .fetch_all(pool)
        .await
    }

    pub async fn by_artist(pool: &PgPool, id: i32) -> Result<Vec<Album>, sqlx::Error> {
        by_parent(pool, "artist_id", id).await
    }

    pub async fn by_label(pool: &PgPool, id: i32) -> Result<Vec<Album>, sqlx::Error> {
        by_parent(pool, "label_id", id).await
    }

    pub async fn by_producer(pool: &PgPool, id: i32) -> Result<Vec<Album>, sqlx::Error> {
        by_parent(pool, "producer_id", id).await
    }

    pub async fn by_genre(pool: &PgPool, id: i32) -> Result<Vec<Album>, sqlx::Error> {
        by_parent(pool, "genre_id", id).await
    }

    pub async fn insert(pool: &PgPool, album: &Album) -> Result<i32, sqlx::Error> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO albums (rating, release_date, name, photo, wikipedia_url, spotify_url, \
             tidal_url, artist_id, label_id, producer_id, genre_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING id",
        )
        .bind(album.rating)
        .bind(&album.release_date)
        .bind(&album.name)
        .bind(&album.photo)
        .bind(&album.wikipedia_url)
        .bind(&album.spotify_url)
        .bind(&album.tidal_url)
        .bind(album.artist_id)
        .bind(album.label_id)
        .bind(album.producer_id)
        .bind(album.genre_id)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    pub async fn update(pool: &PgPool, album: &Album) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE albums SET rating = $1, release_date = $2, name = $3, photo = $4, \
             wikipedia_url = $5, spotify_url = $6, tidal_url = $7, artist_id = $8, \
             label_id = $9, producer_id = $10, genre_id = $11 WHERE id = $12",
        )
        .bind(album.rating)
        .bind(&album.release_date)
        .bind(&album.name)
        .bind(&album.photo)
        .bind(&album.wikipedia_url)
        .bind(&album.spotify_url)
        .bind(&album.tidal_url)
        .bind(album.artist_id)
        .bind(album.label_id)
        .bind(album.producer_id)
        .bind(album.genre_id)
        .bind(album.id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM albums WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub mod labels {
    use super::*;

    pub async fn list(pool: &PgPool) -> Result<Vec<Label>, sqlx::Error> {
        sqlx::query_as::<_, Label>(
            "SELECT id, name, logo, wikipedia_url FROM labels ORDER BY name ASC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Label>, sqlx::Error> {
        sqlx::query_as::<_, Label>("SELECT id, name, logo, wikipedia_url FROM labels WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn insert(pool: &PgPool, label: &Label) -> Result<i32, sqlx::Error> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO labels (name, logo, wikipedia_url) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&label.name)
        .bind(&label.logo)
        .bind(&label.wikipedia_url)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    pub async fn update(pool: &PgPool, label: &Label) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE labels SET name = $1, logo = $2, wikipedia_url = $3 WHERE id = $4")
                .bind(&label.name)
                .bind(&label.logo)
                .bind(&label.wikipedia_url)
                .bind(label.id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM labels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub mod producers {
    use super::*;

    pub async fn list(pool: &PgPool) -> Result<Vec<Producer>, sqlx::Error> {
        sqlx::query_as::<_, Producer>(
            "SELECT id, rating, name, photo, wikipedia_url FROM producers ORDER BY name ASC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Producer>, sqlx::Error> {
        sqlx::query_as::<_, Producer>(
            "SELECT id, rating, name, photo, wikipedia_url FROM producers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn insert(pool: &PgPool, producer: &Producer) -> Result<i32, sqlx::Error> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO producers (rating, name, photo, wikipedia_url) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(producer.rating)
        .bind(&producer.name)
        .bind(&producer.photo)
        .bind(&producer.wikipedia_url)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    pub async fn update(pool: &PgPool, producer: &Producer) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE producers SET rating = $1, name = $2, photo = $3, wikipedia_url = $4 \
             WHERE id = $5",
        )
        .bind(producer.rating)
        .bind(&producer.name)
        .bind(&producer.photo)
        .bind(&producer.wikipedia_url)
        .bind(producer.id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM producers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub mod genres {
    use super::*;

    pub async fn list(pool: &PgPool) -> Result<Vec<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name ASC")
            .fetch_all(pool)
            .await
    }

    pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn insert(pool: &PgPool, genre: &Genre) -> Result<i32, sqlx::Error> {
        let (id,): (i32,) = sqlx::query_as("INSERT INTO genres (name) VALUES ($1) RETURNING id")
            .bind(&genre.name)
            .fetch_one(pool)
            .await?;
        Ok(id)
    }

    pub async fn update(pool: &PgPool, genre: &Genre) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE genres SET name = $1 WHERE id = $2")
            .bind(&genre.name)
            .bind(genre.id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub mod users {
    use super::*;

    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, role FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }
}
