use anyhow::Result;

use super::NoopPlayer;
use super::NoopRecorder;
use crate::domain::models::AudioPlayer;
use crate::domain::models::AudioRecorder;

#[tokio::test]
async fn it_refuses_to_record() -> Result<()> {
    let mut recorder = NoopRecorder::default();
    let err = recorder.start().await.unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Gravação de áudio não configurada. Defina 'recorder' no arquivo de configuração.");

    assert!(recorder.stop().await.is_err());
    recorder.cancel().await?;

    return Ok(());
}

#[tokio::test]
async fn it_refuses_to_play() -> Result<()> {
    let mut player = NoopPlayer::default();
    let err = player.play("http://localhost:5001/a.mp3").await.unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Reprodução de áudio não configurada. Defina 'player' no arquivo de configuração.");

    player.stop().await?;
    assert!(!player.is_playing());

    return Ok(());
}
