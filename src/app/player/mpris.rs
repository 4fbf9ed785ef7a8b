use std::collections::HashMap;

use zbus::Connection;
use zbus::fdo::{DBusProxy, PropertiesProxy};
use zbus::names::{BusName, InterfaceName};
use zbus::zvariant::OwnedValue;

use super::metadata::{MetadataError, MetadataSource, TrackMetadata, decode_metadata};

pub const PLAYER_BUS_NAME: &str = "org.mpris.MediaPlayer2.spotify";
pub const PLAYER_OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
pub const PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";

/// Handle to the Spotify MPRIS object, held for the whole process lifetime.
///
/// Properties are read through `org.freedesktop.DBus.Properties.Get` on every
/// call; `Position` is never announced via `PropertiesChanged`, so nothing is
/// cached.
pub struct MprisPlayer {
    properties: PropertiesProxy<'static>,
}

impl MprisPlayer {
    pub async fn connect(connection: &Connection) -> zbus::Result<Self> {
        let properties = PropertiesProxy::builder(connection)
            .destination(PLAYER_BUS_NAME)?
            .path(PLAYER_OBJECT_PATH)?
            .build()
            .await?;
        Ok(Self { properties })
    }

    async fn property(&self, name: &str) -> Result<OwnedValue, MetadataError> {
        let interface = InterfaceName::from_static_str_unchecked(PLAYER_INTERFACE);
        Ok(self.properties.get(interface, name).await?)
    }
}

impl MetadataSource for MprisPlayer {
    async fn fetch_metadata(&self) -> Result<TrackMetadata, MetadataError> {
        let metadata = self.property("Metadata").await?;
        let position = self.property("Position").await?;

        let fields = HashMap::<String, OwnedValue>::try_from(metadata)
            .map_err(MetadataError::UnexpectedShape)?;

        decode_metadata(&fields, &position)
    }
}

/// Ask the bus daemon whether the player currently owns its well-known name
pub async fn player_is_running(connection: &Connection) -> zbus::Result<bool> {
    let dbus = DBusProxy::new(connection).await?;
    let name = BusName::try_from(PLAYER_BUS_NAME)?;
    Ok(dbus.name_has_owner(name).await?)
}
